//! Fixture messages shared by the integration tests.
//!
//! `populated_*` はシードから決定的にランダムなメッセージを作る。

#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tagframe_core::Message;
use ulid::Ulid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    pub id: i64,
}

impl Message for Ping {
    const NAME: &'static str = "wire.ping";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pong {
    pub id: i64,
}

impl Message for Pong {
    const NAME: &'static str = "wire.pong";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSubmitted {
    pub task_id: Ulid,
    pub task_type: String,
    pub submitted_at: DateTime<Utc>,
    pub priority: Priority,
    pub payload: Vec<u8>,
}

impl Message for TaskSubmitted {
    const NAME: &'static str = "wire.task.submitted.v1";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCompleted {
    pub task_id: Ulid,
    pub attempts: u32,
    pub finished_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl Message for TaskCompleted {
    const NAME: &'static str = "wire.task.completed.v1";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    pub worker: String,
    pub seq: u64,
    pub load_percent: u8,
}

impl Message for Heartbeat {
    const NAME: &'static str = "wire.heartbeat";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub items: Vec<TaskSubmitted>,
    pub labels: BTreeMap<String, String>,
}

impl Message for Batch {
    const NAME: &'static str = "wire.batch";
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn text(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len).map(|_| rng.sample(Alphanumeric) as char).collect()
}

fn timestamp(rng: &mut StdRng) -> DateTime<Utc> {
    // 2020-01-01 .. 2030-01-01
    let millis = rng.gen_range(1_577_836_800_000i64..1_893_456_000_000i64);
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default()
}

fn ulid(rng: &mut StdRng) -> Ulid {
    let millis = rng.gen_range(1_577_836_800_000u64..1_893_456_000_000u64);
    Ulid::from_parts(millis, rng.gen_range(0..u128::MAX))
}

pub fn populated_task_submitted(rng: &mut StdRng) -> TaskSubmitted {
    let priority = match rng.gen_range(0..3) {
        0 => Priority::Low,
        1 => Priority::Normal,
        _ => Priority::High,
    };
    let payload_len = rng.gen_range(0..64);
    TaskSubmitted {
        task_id: ulid(rng),
        task_type: text(rng, 24),
        submitted_at: timestamp(rng),
        priority,
        payload: (0..payload_len).map(|_| rng.gen_range(0..=u8::MAX)).collect(),
    }
}

pub fn populated_task_completed(rng: &mut StdRng) -> TaskCompleted {
    let error = if rng.gen_bool(0.5) {
        Some(text(rng, 40))
    } else {
        None
    };
    TaskCompleted {
        task_id: ulid(rng),
        attempts: rng.gen_range(1..=5),
        finished_at: timestamp(rng),
        error,
    }
}

pub fn populated_heartbeat(rng: &mut StdRng) -> Heartbeat {
    Heartbeat {
        worker: text(rng, 16),
        seq: rng.gen_range(0..u64::MAX),
        load_percent: rng.gen_range(0..=100),
    }
}

pub fn populated_batch(rng: &mut StdRng) -> Batch {
    let items = (0..rng.gen_range(0..8))
        .map(|_| populated_task_submitted(rng))
        .collect();
    let labels = (0..rng.gen_range(0..4))
        .map(|_| (text(rng, 8), text(rng, 12)))
        .collect();
    Batch { items, labels }
}
