//! Meeting state: the participant registry and the speaking-state tracker.
//!
//! `Meeting` owns all mutable tracking state. Views only ever read it;
//! every clock-dependent operation takes an explicit `now` so the logic
//! is testable without sleeping.

use std::time::Instant;

/// A tracked meeting participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Unique within the registry, trimmed, never empty.
    pub name: String,
    /// Committed speaking time in seconds, excluding any in-progress interval.
    pub speech_time: f64,
    /// Number of times this participant started speaking.
    pub speech_count: u32,
}

#[derive(Debug, Clone)]
struct ActiveSpeaker {
    name: String,
    started_at: Instant,
}

/// Participant registry plus the single optional active speaker.
///
/// Invariants: participant names are unique, at most one participant is
/// speaking at any time, and the active speaker always names a live
/// participant.
#[derive(Debug, Default)]
pub struct Meeting {
    participants: Vec<Participant>,
    active: Option<ActiveSpeaker>,
}

impl Meeting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant. Returns `false` (no-op) if the name is empty
    /// after trimming or already taken. Insertion order is display order.
    pub fn add_participant(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.participants.iter().any(|p| p.name == name) {
            return false;
        }
        self.participants.push(Participant {
            name: name.to_string(),
            speech_time: 0.0,
            speech_count: 0,
        });
        true
    }

    /// Remove a participant by name. If they are the active speaker, the
    /// in-flight interval is discarded; it is never committed to the
    /// record being deleted.
    pub fn remove_participant(&mut self, name: &str) -> bool {
        let Some(pos) = self.participants.iter().position(|p| p.name == name) else {
            debug_assert!(false, "remove for unknown participant: {name}");
            return false;
        };
        if self.active.as_ref().is_some_and(|a| a.name == name) {
            self.active = None;
        }
        self.participants.remove(pos);
        true
    }

    /// Toggle the speaking state of a participant at instant `now`.
    ///
    /// Idle → Speaking(p) starts the interval and bumps `speech_count`.
    /// Speaking(p) → Idle commits the elapsed interval. Toggling another
    /// participant while someone speaks commits the current speaker
    /// first (single-active-speaker invariant), then starts the new one.
    pub fn toggle_speaker(&mut self, name: &str, now: Instant) -> bool {
        let Some(pos) = self.participants.iter().position(|p| p.name == name) else {
            debug_assert!(false, "toggle for unknown participant: {name}");
            return false;
        };
        match self.active.take() {
            Some(active) if active.name == name => {
                self.commit(&active, now);
            }
            other => {
                if let Some(active) = other {
                    self.commit(&active, now);
                }
                self.participants[pos].speech_count += 1;
                self.active = Some(ActiveSpeaker {
                    name: name.to_string(),
                    started_at: now,
                });
            }
        }
        true
    }

    /// Zero every participant's time and count and return to Idle. Any
    /// in-flight interval is discarded.
    pub fn reset_statistics(&mut self) {
        for p in &mut self.participants {
            p.speech_time = 0.0;
            p.speech_count = 0;
        }
        self.active = None;
    }

    /// Total speaking time of `participant` as of `now`: committed time
    /// plus the in-progress interval if they are currently speaking.
    pub fn speech_time(&self, participant: &Participant, now: Instant) -> f64 {
        let mut time = participant.speech_time;
        if let Some(active) = &self.active {
            if active.name == participant.name {
                time += now.duration_since(active.started_at).as_secs_f64();
            }
        }
        time
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Name of the current active speaker, if any.
    pub fn active_speaker(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }

    pub fn is_speaking(&self, name: &str) -> bool {
        self.active.as_ref().is_some_and(|a| a.name == name)
    }

    fn commit(&mut self, active: &ActiveSpeaker, now: Instant) {
        let elapsed = now.duration_since(active.started_at).as_secs_f64();
        if let Some(p) = self.participants.iter_mut().find(|p| p.name == active.name) {
            p.speech_time += elapsed;
        }
    }
}
