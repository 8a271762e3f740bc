mod scenario;

use anyhow::{Context, Result};
use editable_config::{Config, SelectionConfig};
use editable_selection::{
    DrawRect, Editor, GridLayout, InlineAnchor, PointerInput, Position, Range, SelectionLayer,
};
use scenario::{Scenario, Step, container_of};
use std::{env, path::PathBuf, process};

/// Prints every draw call instead of painting it
struct PrintLayer;

impl SelectionLayer for PrintLayer {
    fn draw_caret(&mut self, rect: DrawRect) {
        println!("  draw caret {}", describe(&rect));
    }

    fn draw_blocks(&mut self, rects: Vec<DrawRect>) {
        for rect in &rects {
            println!("  draw block {}", describe(rect));
        }
    }

    fn clear_selection(&mut self) {
        println!("  clear selection");
    }

    fn clear_caret(&mut self) {
        println!("  clear caret");
    }
}

fn describe(rect: &DrawRect) -> String {
    format!(
        "x={} y={} w={} h={} {}",
        rect.x, rect.y, rect.width, rect.height, rect.color
    )
}

fn load_config(path: Option<&String>) -> Result<SelectionConfig> {
    let config = match path {
        Some(path) => Config::load_from_path(PathBuf::from(path))?,
        None => Config::load()?,
    };
    match config {
        Some(config) => Ok(config.selection),
        None => {
            log::info!(
                "No config file at {}, using defaults",
                Config::config_path().display()
            );
            Ok(SelectionConfig::default())
        }
    }
}

fn replay(scenario: Scenario, config: SelectionConfig) -> Result<()> {
    let doc = scenario.build_document()?;
    let mut editor = Editor::new(doc, config);
    let mut toolbar = InlineAnchor::new();
    let mut layer = PrintLayer;

    for (index, step) in scenario.steps.into_iter().enumerate() {
        println!("step {index}: {step:?}");
        match step {
            Step::Pointer { phase, key, offset } => {
                let container = container_of(editor.doc(), &key);
                editor.selection_mut().handle_pointer(PointerInput {
                    container,
                    phase,
                    position: Some(Position::new(key, offset)),
                });
            }
            Step::Input(event) => editor.selection_mut().handle_input(event),
            Step::Edit(edit) => {
                if let Err(e) = editor.apply(edit) {
                    println!("  rejected: {e}");
                }
            }
            Step::SilentEdit(edit) => {
                if let Err(e) = editor.apply_silent(edit) {
                    println!("  rejected: {e}");
                }
            }
            Step::Select { anchor, focus } => {
                let range = match focus {
                    Some(focus) => Range::new(anchor, focus),
                    None => Range::caret(anchor),
                };
                if let Err(e) = editor.select(range) {
                    println!("  rejected: {e}");
                }
            }
            Step::Frame => {
                let layout = GridLayout::measure(editor.doc());
                editor.flush_frame(&layout, &mut layer);
            }
        }

        let layout = GridLayout::measure(editor.doc());
        for event in editor.drain_events() {
            println!("  event {event:?}");
            toolbar.handle(&event, editor.doc(), &layout);
        }
        if let Some(point) = toolbar.point() {
            println!("  toolbar at x={} y={} {:?}", point.x, point.y, point.side);
        }
    }

    let ranges = editor.selection().ranges();
    println!(
        "final: {} range(s), collapsed={}, focus={:?}",
        ranges.len(),
        editor.selection().is_collapsed(),
        editor.selection().focus_state()
    );
    for range in ranges {
        println!(
            "  {}:{} -> {}:{}",
            range.anchor.key, range.anchor.offset, range.focus.key, range.focus.offset
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <scenario.toml> [config.toml]", args[0]);
        process::exit(1);
    }

    let scenario = Scenario::from_path(&PathBuf::from(&args[1]))?;
    let config = load_config(args.get(2)).context("Failed to load config")?;
    replay(scenario, config)
}
