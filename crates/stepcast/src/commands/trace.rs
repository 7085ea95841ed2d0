use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use stepcast::{Engine, HostEvent, Navigation, Presentation, RecordingHost};

/// Upper bound on navigation calls per direction; playback always
/// terminates well before this on a valid presentation.
const MAX_STEPS: usize = 100_000;

#[derive(Debug, PartialEq)]
pub enum Line {
    Command(String),
    Event(HostEvent),
    Outcome(Navigation),
}

/// Play `presentation` with every animation completing immediately,
/// recording each navigation call and the host calls it caused.
pub fn record(presentation: Presentation, forward_only: bool) -> Result<Vec<Line>> {
    let mut lines = vec![Line::Command("start".to_string())];
    let mut engine = Engine::start(presentation, RecordingHost::new())?;
    drain(&mut engine, &mut lines);

    for _ in 0..MAX_STEPS {
        lines.push(Line::Command("next".to_string()));
        let outcome = engine.advance()?;
        engine.settle()?;
        drain(&mut engine, &mut lines);
        lines.push(Line::Outcome(outcome));
        if outcome == Navigation::Finished {
            break;
        }
    }
    if forward_only {
        return Ok(lines);
    }

    for _ in 0..MAX_STEPS {
        lines.push(Line::Command("previous".to_string()));
        let outcome = engine.retreat()?;
        drain(&mut engine, &mut lines);
        lines.push(Line::Outcome(outcome));
        if outcome == Navigation::AtStart {
            break;
        }
    }
    Ok(lines)
}

fn drain(engine: &mut Engine<RecordingHost>, lines: &mut Vec<Line>) {
    lines.extend(engine.host_mut().take_events().into_iter().map(Line::Event));
}

pub fn run(file: &Path, forward_only: bool) -> Result<()> {
    let presentation =
        Presentation::load(file).with_context(|| format!("Cannot play {}", file.display()))?;
    for line in record(presentation, forward_only)? {
        match line {
            Line::Command(name) => println!("{}", format!("> {name}").bold()),
            Line::Event(event) => println!("    {event}"),
            Line::Outcome(outcome) => println!("  {}", format_outcome(outcome)),
        }
    }
    Ok(())
}

fn format_outcome(outcome: Navigation) -> String {
    match outcome {
        Navigation::Played(at) => format!("played {at}").green().to_string(),
        Navigation::Rewound(at) => format!("rewound to {at}").cyan().to_string(),
        Navigation::Finished => "finished".yellow().to_string(),
        Navigation::AtStart => "at start".yellow().to_string(),
        Navigation::Busy => "busy".red().to_string(),
    }
}
