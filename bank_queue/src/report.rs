//! Read-only views of a run for whatever presents the results.
//!
//! [`Summary`] is the end-of-run snapshot; [`Report`] bundles it with the
//! configuration and the full logs and can write them as JSON and CSV.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::state::{Logs, ServerState, SimulationState};
use crate::{Event, ModelConfig, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub queue_length: usize,
    pub servers: Vec<ServerState>,
    /// Simulated seconds elapsed when the run stopped.
    pub elapsed_seconds: f64,
    /// Customers admitted to a teller.
    pub customers_processed: usize,
    /// `None` until at least one customer has been admitted.
    pub max_wait_minutes: Option<f64>,
    pub mean_wait_minutes: Option<f64>,
}

impl Summary {
    pub fn from_state(state: &SimulationState) -> Summary {
        let waits = &state.logs.wait_times;
        let max_wait_minutes = waits.iter().copied().reduce(f64::max);
        let mean_wait_minutes = if waits.is_empty() {
            None
        } else {
            Some(waits.iter().sum::<f64>() / waits.len() as f64)
        };
        Summary {
            queue_length: state.wait_line.len(),
            servers: state.servers.clone(),
            elapsed_seconds: state.clock,
            customers_processed: waits.len(),
            max_wait_minutes,
            mean_wait_minutes,
        }
    }

    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_seconds / 3600.0
    }

    pub fn busy_servers(&self) -> usize {
        self.servers
            .iter()
            .filter(|s| **s == ServerState::Busy)
            .count()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let servers: Vec<&str> = self
            .servers
            .iter()
            .map(|s| match s {
                ServerState::Free => "free",
                ServerState::Busy => "busy",
            })
            .collect();
        writeln!(f, "Queue length: {}", self.queue_length)?;
        writeln!(f, "Servers: [{}]", servers.join(", "))?;
        writeln!(f, "Duration: {:.2} h", self.elapsed_hours())?;
        writeln!(f, "Total customers: {}", self.customers_processed)?;
        match (self.max_wait_minutes, self.mean_wait_minutes) {
            (Some(max), Some(mean)) => {
                writeln!(f, "- Maximum wait in line: {:.1} min", max)?;
                write!(f, "- Mean wait in line: {:.1} min", mean)
            }
            _ => write!(f, "- No customer has been served yet"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub config: ModelConfig,
    pub summary: Summary,
    pub logs: Logs,
}

impl Report {
    pub fn new(config: &ModelConfig, state: &SimulationState) -> Report {
        Report {
            config: config.clone(),
            summary: Summary::from_state(state),
            logs: state.logs.clone(),
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// One row per dispatched event, with the line length seen at that event.
    pub fn write_event_log_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["index", "time", "kind", "server", "queue_length"])?;
        for (i, record) in self.logs.event_log.iter().enumerate() {
            let (kind, server) = match record.kind {
                Event::Arrival => ("arrival", String::new()),
                Event::ServiceCompletion(server) => ("service_completion", server.to_string()),
            };
            let queue_length = self
                .logs
                .queue_length_log
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_default();
            wtr.write_record(&[
                i.to_string(),
                record.time.to_string(),
                kind.to_string(),
                server,
                queue_length,
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_wait_times_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["customer", "wait_minutes"])?;
        for (i, wait) in self.logs.wait_times.iter().enumerate() {
            wtr.write_record(&[i.to_string(), wait.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_queue_length_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["time", "queue_length"])?;
        for (record, length) in self
            .logs
            .event_log
            .iter()
            .zip(self.logs.queue_length_log.iter())
        {
            wtr.write_record(&[record.time.to_string(), length.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write every output to a directory
    ///
    /// Creates:
    /// - report.json
    /// - events.csv
    /// - wait_times.csv
    /// - queue_length.csv
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        self.write_json(dir.join("report.json"))?;
        self.write_event_log_csv(dir.join("events.csv"))?;
        self.write_wait_times_csv(dir.join("wait_times.csv"))?;
        self.write_queue_length_csv(dir.join("queue_length.csv"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EventRecord;

    fn finished_state() -> SimulationState {
        let mut state = SimulationState::new(2);
        state.clock = 5400.0;
        state.servers[1] = ServerState::Busy;
        state.logs.wait_times = vec![0.0, 1.5, 0.5];
        state.logs.event_log = vec![
            EventRecord {
                kind: Event::Arrival,
                time: 0.0,
            },
            EventRecord {
                kind: Event::ServiceCompletion(1),
                time: 12.5,
            },
        ];
        state.logs.queue_length_log = vec![0, 2];
        state
    }

    #[test]
    fn summary_statistics() {
        let summary = Summary::from_state(&finished_state());
        assert_eq!(summary.customers_processed, 3);
        assert_eq!(summary.max_wait_minutes, Some(1.5));
        assert_eq!(summary.mean_wait_minutes, Some(2.0 / 3.0));
        assert_eq!(summary.elapsed_hours(), 1.5);
        assert_eq!(summary.busy_servers(), 1);
    }

    #[test]
    fn summary_without_customers_has_no_wait_statistics() {
        let summary = Summary::from_state(&SimulationState::new(1));
        assert_eq!(summary.customers_processed, 0);
        assert_eq!(summary.max_wait_minutes, None);
        assert_eq!(summary.mean_wait_minutes, None);
        assert!(summary.to_string().contains("No customer"));
    }

    #[test]
    fn summary_display() {
        let text = Summary::from_state(&finished_state()).to_string();
        assert!(text.contains("Servers: [free, busy]"));
        assert!(text.contains("Duration: 1.50 h"));
        assert!(text.contains("Maximum wait in line: 1.5 min"));
    }

    #[test]
    fn write_all_creates_files() {
        let dir = std::env::temp_dir().join(format!("bank_queue_report_{}", std::process::id()));
        let report = Report::new(&ModelConfig::baseline(), &finished_state());

        report.write_all(&dir).unwrap();

        let events = fs::read_to_string(dir.join("events.csv")).unwrap();
        assert!(events.starts_with("index,time,kind,server,queue_length"));
        assert!(events.contains("1,12.5,service_completion,1,2"));
        let json = fs::read_to_string(dir.join("report.json")).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.logs, report.logs);

        fs::remove_dir_all(&dir).unwrap();
    }
}
