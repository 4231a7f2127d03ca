// テスト用のメッセージ型。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    pub id: i64,
}

impl Message for Ping {
    const NAME: &'static str = "test.ping";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pong {
    pub id: i64,
}

impl Message for Pong {
    const NAME: &'static str = "test.pong";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub from: String,
    pub body: String,
    pub labels: BTreeMap<String, String>,
}

impl Message for Chat {
    const NAME: &'static str = "test.chat";
}

/// Zero value does not survive JSON (NaN becomes null).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub celsius: f64,
}

impl Default for Reading {
    fn default() -> Self {
        Self { celsius: f64::NAN }
    }
}

impl Message for Reading {
    const NAME: &'static str = "test.reading";
}

/// Serializes fine as a zero value but not once it holds data under JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub chunks: std::collections::HashMap<Vec<u8>, u8>,
}

impl Message for Blob {
    const NAME: &'static str = "test.blob";
}
