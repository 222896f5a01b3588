//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying `type`,
//! `timestamp` and a per-file `seq` number next to the event payload.
//! Runs append to the same file; every logger instance starts with a
//! `session_start` record so runs can be told apart.

use roundtable_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

struct Sink {
    writer: BufWriter<File>,
    seq: u64,
}

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via a `Mutex`. Every record is flushed as it is written.
pub struct JsonlConversationLogger {
    sink: Mutex<Sink>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the log file for appending.
    ///
    /// Parent directories are created as needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let logger = Self {
            sink: Mutex::new(Sink {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        };
        logger.log(ConversationEvent::new(
            "session_start",
            json!({ "version": env!("CARGO_PKG_VERSION") }),
        ));
        Ok(logger)
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: ConversationEvent, seq: u64) -> Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let mut map = match event.payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("type".to_string(), Value::from(event.event_type));
    map.insert("timestamp".to_string(), Value::from(timestamp));
    map.insert("seq".to_string(), Value::from(seq));
    Value::Object(map)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let line = record(event, sink.seq).to_string();
        sink.seq += 1;
        let _ = writeln!(sink.writer, "{}", line);
        let _ = sink.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "speaker_selected",
            json!({ "round": 0, "participant": "Farmer", "reason": "Rural view first" }),
        ));
        logger.log(ConversationEvent::new(
            "participant_turn",
            json!({ "round": 1, "participant": "Farmer", "content": "Farms need relief." }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "session_start");

        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line["seq"], i as u64);
            assert!(line["timestamp"].is_string());
        }

        assert_eq!(lines[1]["type"], "speaker_selected");
        assert_eq!(lines[1]["participant"], "Farmer");
        assert_eq!(lines[2]["type"], "participant_turn");
        assert_eq!(lines[2]["content"], "Farms need relief.");
    }

    #[test]
    fn test_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        for _ in 0..2 {
            let logger = JsonlConversationLogger::open(&path).unwrap();
            logger.log(ConversationEvent::new("summary", json!({ "content": "Done." })));
        }

        let types: Vec<String> = read_lines(&path)
            .iter()
            .map(|l| l["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(types, ["session_start", "summary", "session_start", "summary"]);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();
        logger.log(ConversationEvent::new("note", json!("just a string")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[1]["type"], "note");
        assert_eq!(lines[1]["data"], "just a string");
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        assert!(JsonlConversationLogger::open(blocker.join("run.jsonl")).is_err());
    }
}
