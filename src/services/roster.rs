use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{CreateUserRequest, Participant, ParticipantId, UpdateUserRequest};

/// Errors that can occur with roster operations
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Participant not found: {0}")]
    NotFound(ParticipantId),

    #[error("Participant with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
struct RosterState {
    participants: BTreeMap<ParticipantId, Participant>,
    next_id: ParticipantId,
}

/// In-memory participant store
///
/// Owned by the server state and handed to the matcher as a snapshot, so a
/// computation never sees a half-applied write. Ids are assigned
/// sequentially from 1 and iteration follows id order.
#[derive(Debug)]
pub struct Roster {
    state: RwLock<RosterState>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RosterState {
                participants: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Register a participant, rejecting duplicate emails
    pub async fn create(&self, request: CreateUserRequest) -> Result<Participant, RosterError> {
        let mut state = self.state.write().await;

        if state.participants.values().any(|p| p.email == request.email) {
            return Err(RosterError::DuplicateEmail(request.email));
        }

        let now = Utc::now();
        let participant = Participant {
            id: state.next_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            about: request.about,
            preferences: request.preferences,
            created_at: now,
            updated_at: now,
        };

        state.next_id += 1;
        state.participants.insert(participant.id, participant.clone());

        tracing::debug!("Created participant {}", participant.id);
        Ok(participant)
    }

    pub async fn get(&self, id: ParticipantId) -> Option<Participant> {
        self.state.read().await.participants.get(&id).cloned()
    }

    /// Participants for the given ids, skipping unknown ones
    pub async fn get_many(&self, ids: &[ParticipantId]) -> Vec<Participant> {
        let state = self.state.read().await;
        ids.iter().filter_map(|id| state.participants.get(id).cloned()).collect()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Participant> {
        let state = self.state.read().await;
        state.participants.values().find(|p| p.email == email).cloned()
    }

    /// Consistent copy of every participant, in id order
    pub async fn snapshot(&self) -> Vec<Participant> {
        self.state.read().await.participants.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.participants.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Apply a partial update and bump `updated_at`
    pub async fn update(&self, id: ParticipantId, update: UpdateUserRequest) -> Result<Participant, RosterError> {
        let mut state = self.state.write().await;

        if let Some(email) = &update.email {
            if state.participants.values().any(|p| p.id != id && &p.email == email) {
                return Err(RosterError::DuplicateEmail(email.clone()));
            }
        }

        let participant = state.participants.get_mut(&id).ok_or(RosterError::NotFound(id))?;

        if let Some(name) = update.name {
            participant.name = name;
        }
        if let Some(email) = update.email {
            participant.email = email;
        }
        if let Some(phone) = update.phone {
            participant.phone = phone;
        }
        if let Some(about) = update.about {
            participant.about = about;
        }
        if let Some(preferences) = update.preferences {
            participant.preferences = preferences;
        }
        participant.updated_at = Utc::now();

        Ok(participant.clone())
    }

    pub async fn delete(&self, id: ParticipantId) -> Result<(), RosterError> {
        let mut state = self.state.write().await;
        state.participants.remove(&id).map(|_| ()).ok_or(RosterError::NotFound(id))
    }

    /// Bulk-load participants, stopping at the first rejected entry
    pub async fn seed(&self, entries: Vec<CreateUserRequest>) -> Result<usize, RosterError> {
        let count = entries.len();
        for entry in entries {
            self.create(entry).await?;
        }
        Ok(count)
    }

    /// Load a JSON array of participants from disk
    pub async fn seed_from_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, RosterError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let entries: Vec<CreateUserRequest> = serde_json::from_str(&raw)?;
        self.seed(entries).await
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferenceProfile;

    fn request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            about: String::new(),
            preferences: PreferenceProfile {
                cleanliness: "Very tidy".to_string(),
                sleep_schedule: "Flexible".to_string(),
                noise_tolerance: "Prefer quiet environment".to_string(),
                guests: "Rarely".to_string(),
                lifestyle: "Homebody".to_string(),
                study_work: "Morning person".to_string(),
                ac_preference: "No preference".to_string(),
                roommate_count: "1 roommate".to_string(),
            },
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        tokio_test::block_on(async {
            let roster = Roster::new();
            let a = roster.create(request("Ana", "ana@example.com")).await.unwrap();
            let b = roster.create(request("Ben", "ben@example.com")).await.unwrap();

            assert_eq!(a.id, 1);
            assert_eq!(b.id, 2);
            assert_eq!(roster.len().await, 2);
        });
    }

    #[test]
    fn test_duplicate_email_rejected() {
        tokio_test::block_on(async {
            let roster = Roster::new();
            roster.create(request("Ana", "ana@example.com")).await.unwrap();
            let err = roster.create(request("Other", "ana@example.com")).await.unwrap_err();

            assert!(matches!(err, RosterError::DuplicateEmail(_)));
            assert_eq!(roster.len().await, 1);
        });
    }

    #[test]
    fn test_update_is_partial() {
        tokio_test::block_on(async {
            let roster = Roster::new();
            let created = roster.create(request("Ana", "ana@example.com")).await.unwrap();

            let update = UpdateUserRequest {
                about: Some("Night shift nurse".to_string()),
                ..Default::default()
            };
            let updated = roster.update(created.id, update).await.unwrap();

            assert_eq!(updated.name, "Ana");
            assert_eq!(updated.about, "Night shift nurse");
            assert!(updated.updated_at >= created.updated_at);
        });
    }

    #[test]
    fn test_update_and_delete_missing() {
        tokio_test::block_on(async {
            let roster = Roster::new();
            assert!(matches!(
                roster.update(7, UpdateUserRequest::default()).await,
                Err(RosterError::NotFound(7))
            ));
            assert!(matches!(roster.delete(7).await, Err(RosterError::NotFound(7))));
        });
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        tokio_test::block_on(async {
            let roster = Roster::new();
            let a = roster.create(request("Ana", "ana@example.com")).await.unwrap();
            roster.delete(a.id).await.unwrap();
            let b = roster.create(request("Ben", "ben@example.com")).await.unwrap();

            assert_eq!(b.id, 2);
            assert!(roster.get(a.id).await.is_none());
            assert_eq!(roster.get_many(&[1, 2, 3]).await.len(), 1);
        });
    }

    #[test]
    fn test_snapshot_in_id_order() {
        tokio_test::block_on(async {
            let roster = Roster::new();
            let seeded = roster
                .seed(vec![
                    request("Ana", "ana@example.com"),
                    request("Ben", "ben@example.com"),
                    request("Cy", "cy@example.com"),
                ])
                .await
                .unwrap();

            assert_eq!(seeded, 3);
            let ids: Vec<_> = roster.snapshot().await.iter().map(|p| p.id).collect();
            assert_eq!(ids, vec![1, 2, 3]);
            assert_eq!(roster.find_by_email("ben@example.com").await.map(|p| p.id), Some(2));
        });
    }

    #[test]
    fn test_sample_roster_is_in_domain() {
        let entries: Vec<CreateUserRequest> =
            serde_json::from_str(include_str!("../../data/sample_roster.json")).unwrap();

        assert_eq!(entries.len(), 4);
        for entry in &entries {
            assert!(entry.preferences.unknown_values().is_empty(), "{}", entry.name);
        }

        tokio_test::block_on(async {
            let roster = Roster::new();
            assert_eq!(roster.seed(entries).await.unwrap(), 4);
            assert!(!roster.is_empty().await);
        });
    }
}
