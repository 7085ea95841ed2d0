use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use stepcast::host::BUILTIN_EXECUTORS;
use stepcast::timeline::Timeline;
use stepcast::{Presentation, Trigger};

/// What `check` found in a presentation that loaded successfully.
#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub slides: usize,
    pub actions: usize,
    pub clicks: usize,
    pub with_previous: usize,
    pub after_previous: usize,
    /// Problems that would stop playback at run time.
    pub problems: Vec<String>,
    /// Images referenced by objects but missing on disk.
    pub missing_images: Vec<String>,
}

pub fn summarize(presentation: &Presentation, base_path: &Path) -> Summary {
    let timeline = Timeline::new(presentation);
    let mut summary = Summary {
        slides: presentation.slide_count(),
        actions: timeline.len(),
        ..Summary::default()
    };

    for at in timeline.iter() {
        let Some(action) = presentation.action(at) else {
            continue;
        };
        match action.trigger {
            Trigger::OnClick => summary.clicks += 1,
            Trigger::WithPrevious => summary.with_previous += 1,
            Trigger::AfterPrevious => summary.after_previous += 1,
        }
        if !presentation.knows_target(&action.target) {
            summary
                .problems
                .push(format!("{at}: unknown target `{}`", action.target));
        }
        if !BUILTIN_EXECUTORS.contains(&action.executor.as_str()) {
            summary
                .problems
                .push(format!("{at}: unknown executor `{}`", action.executor));
        }
    }

    for slide in presentation.slides() {
        for object in &slide.objects {
            if let Some(img) = &object.image {
                if !base_path.join(img).is_file() {
                    summary.missing_images.push(img.clone());
                }
            }
        }
    }
    summary
}

pub fn run(file: &Path) -> Result<()> {
    let presentation =
        Presentation::load(file).with_context(|| format!("Cannot play {}", file.display()))?;
    let base_path = file.parent().unwrap_or(Path::new("."));
    let summary = summarize(&presentation, base_path);

    let title = presentation
        .metadata()
        .title
        .clone()
        .unwrap_or_else(|| file.display().to_string());
    println!("{}", title.bold());
    if let Some(author) = &presentation.metadata().author {
        println!("{}", format!("by {author}").dimmed());
    }
    println!();
    println!("  Slides:          {}", summary.slides);
    println!(
        "  Actions:         {} ({} on click, {} with previous, {} after previous)",
        summary.actions, summary.clicks, summary.with_previous, summary.after_previous
    );
    println!("  Cursor:          {}", presentation.cursor_id());

    for (i, slide) in presentation.slides().iter().enumerate() {
        let steps = slide
            .actions
            .iter()
            .filter(|a| a.trigger == Trigger::OnClick)
            .count();
        println!(
            "  {} {:<12} {} action(s), {} step(s)",
            format!("{:>3}.", i + 1).dimmed(),
            slide.primary_object().id,
            slide.actions.len(),
            steps
        );
    }
    println!();

    for img in &summary.missing_images {
        println!("{} missing image {img}", "warning:".yellow().bold());
    }
    for problem in &summary.problems {
        println!("{} {problem}", "error:".red().bold());
    }
    if !summary.problems.is_empty() {
        anyhow::bail!("{} action(s) cannot be played", summary.problems.len());
    }
    println!("{}", format!("OK: {} step(s)", summary.clicks).green());
    Ok(())
}
