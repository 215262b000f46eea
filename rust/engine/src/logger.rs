use std::collections::VecDeque;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::gate::RejectReason;
use crate::hand::{HandCategory, HandResult};
use crate::session::GameMode;

/// What happened to a selection intent at one point of its trip through the gate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionAction {
    /// Lock taken, about to validate
    Enter,
    /// Transition applied
    Accepted,
    /// Dropped without any state change
    Blocked,
}

/// Sequence-numbered diagnostic record of a selection intent.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectionEvent {
    /// Per-gate sequence number, starting at 1
    pub seq: u64,
    pub action: SelectionAction,
    pub card_id: String,
    #[serde(default)]
    pub reason: Option<RejectReason>,
    /// Cards held when the event was recorded
    pub selected_count: usize,
    /// RFC3339 timestamp with millisecond precision
    pub ts: String,
}

/// Receives every selection event of the gate it is attached to.
pub trait SelectionObserver: Send + Sync {
    fn on_event(&self, event: &SelectionEvent);
}

pub const TRACE_CAPACITY: usize = 100;

/// Keeps the most recent selection events in memory.
#[derive(Debug)]
pub struct TraceLog {
    events: Mutex<VecDeque<SelectionEvent>>,
    capacity: usize,
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::with_capacity(TRACE_CAPACITY)
    }
}

impl TraceLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn events(&self) -> Vec<SelectionEvent> {
        let events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        events.iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SelectionObserver for TraceLog {
    fn on_event(&self, event: &SelectionEvent) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        events.push_back(event.clone());
        while events.len() > self.capacity {
            events.pop_front();
        }
    }
}

/// One submitted hand, serialized as a JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    pub mode: GameMode,
    pub level: u32,
    pub cards: Vec<Card>,
    pub category: HandCategory,
    pub value_bonus: u32,
    pub total_points: u32,
    /// Session score after this hand
    pub score: i64,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    pub fn from_result(
        hand_id: String,
        mode: GameMode,
        level: u32,
        result: &HandResult,
        score: i64,
    ) -> Self {
        Self {
            hand_id,
            mode,
            level,
            cards: result.cards.clone(),
            category: result.category,
            value_bonus: result.value_bonus,
            total_points: result.total_points,
            score,
            ts: None,
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
