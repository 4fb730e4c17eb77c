//! File-backed telemetry backend: one JSON object per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use super::{EpisodeSummary, StepRecord, StepSink};
use crate::Result;

/// Sink that appends every record to a JSONL file.
///
/// Step records and episode summaries share the stream; summaries carry an
/// `"episode_end"` marker so consumers can split them back apart.
pub struct JsonlSink {
    writer: Mutex<BufWriter<File>>,
}

#[derive(Serialize)]
struct EpisodeEndLine<'a> {
    event: &'static str,
    #[serde(flatten)]
    summary: &'a EpisodeSummary,
}

impl JsonlSink {
    /// Create or truncate the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_line(&self, value: &impl Serialize) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let result = serde_json::to_writer(&mut *writer, value)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"));
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to write telemetry line");
        }
    }
}

impl StepSink for JsonlSink {
    fn record_step(&self, record: &StepRecord) {
        self.write_line(record);
    }

    fn episode_end(&self, summary: &EpisodeSummary) {
        self.write_line(&EpisodeEndLine {
            event: "episode_end",
            summary,
        });
    }

    fn close(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(err) = writer.flush() {
                tracing::warn!(error = %err, "failed to flush telemetry file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::state::Position;
    use std::time::Duration;

    #[test]
    fn test_writes_parseable_lines() {
        let path = std::env::temp_dir().join(format!(
            "skirmish-jsonl-test-{}.jsonl",
            std::process::id()
        ));

        let sink = JsonlSink::create(&path).unwrap();
        sink.record_step(&StepRecord {
            episode: 0,
            time_step: 3,
            agent_id: 0,
            location: Position::default(),
            action: Action::default(),
            num_supplies: 2,
            num_enemies: 0,
            step_rate: 42,
            depth_map_shape: None,
        });
        sink.episode_end(&EpisodeSummary {
            episode: 0,
            steps: 4,
            elapsed: Duration::from_millis(80),
        });
        sink.close();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let step: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(step["time_step"], 3);
        assert_eq!(step["step_rate"], 42);

        let end: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(end["event"], "episode_end");
        assert_eq!(end["steps"], 4);
    }
}
