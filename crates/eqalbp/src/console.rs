//! Console output for engine events.
//!
//! Provides a `tracing` layer that prints the `event = "..."` records of the
//! EqALBP crates as one readable line each.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str =
    "eqalbp=info,eqalbp_core=info,eqalbp_scoring=info,eqalbp_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Does nothing
/// if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EngineConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats EqALBP events.
pub struct EngineConsoleLayer;

impl<S: Subscriber> Layer<S> for EngineConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Only handle eqalbp events
        if !target.starts_with("eqalbp") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(metadata.level(), target, &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s),
            name => self.fields.push((name, s)),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            name => self.fields.push((name, value.to_string())),
        }
    }
}

/// `eqalbp_scoring::director::engine` → `Scoring`
fn component(target: &str) -> &'static str {
    match target.split("::").next().unwrap_or(target) {
        "eqalbp_core" => "Model",
        "eqalbp_scoring" => "Scoring",
        "eqalbp_solver" => "Solver",
        _ => "EqALBP",
    }
}

fn format_event(level: &Level, target: &str, v: &EventVisitor) -> String {
    let head = format!("{:>5} [{}]", level.as_str(), component(target));
    let field = |name: &str| v.field(name).unwrap_or("?");

    match v.event.as_deref() {
        Some("model_built") => format!(
            "{} model built: {} tasks, {} stations, {} equipment instances, {} dependencies",
            head,
            field("tasks"),
            field("stations"),
            field("equipment"),
            field("dependencies"),
        ),
        Some("score_reset") => format!("{} score reset ({})", head, field("score")),
        Some("phase_transition") => format!(
            "{} every task assigned, switching to local search (cycle time {})",
            head,
            field("cycle_time"),
        ),
        Some("session_initialized") => format!(
            "{} session ready: incremental ({}), filtered ({}), score ({})",
            head,
            field("incremental"),
            field("filtered"),
            field("score"),
        ),
        Some("workers_start") => format!("{} starting {} workers", head, field("workers")),
        Some(name) => {
            let mut line = format!("{} {}", head, name);
            if let Some(message) = &v.message {
                let _ = write!(line, ": {}", message);
            }
            for (key, value) in &v.fields {
                let _ = write!(line, " {}={}", key, value);
            }
            line
        }
        None => match &v.message {
            Some(message) => format!("{} {}", head, message),
            None => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: Option<&str>, fields: &[(&'static str, &str)]) -> EventVisitor {
        EventVisitor {
            event: event.map(str::to_string),
            message: None,
            fields: fields.iter().map(|&(k, v)| (k, v.to_string())).collect(),
        }
    }

    #[test]
    fn test_known_event() {
        let v = visitor(Some("score_reset"), &[("score", "0hard/-42medium/-4123soft")]);
        assert_eq!(
            format_event(&Level::INFO, "eqalbp_scoring::director::engine", &v),
            " INFO [Scoring] score reset (0hard/-42medium/-4123soft)"
        );
    }

    #[test]
    fn test_unknown_event_lists_fields() {
        let v = visitor(Some("filters_built"), &[("admitted", "29"), ("pruned", "31")]);
        assert_eq!(
            format_event(&Level::DEBUG, "eqalbp_solver::heuristic::filter", &v),
            "DEBUG [Solver] filters_built admitted=29 pruned=31"
        );
    }

    #[test]
    fn test_plain_message_and_empty() {
        let mut v = visitor(None, &[]);
        assert_eq!(format_event(&Level::WARN, "eqalbp", &v), "");
        v.message = Some("no station has every required equipment type".to_string());
        assert_eq!(
            format_event(&Level::WARN, "eqalbp_solver", &v),
            " WARN [Solver] no station has every required equipment type"
        );
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::info!(event = "test_event", value = 1);
    }
}
