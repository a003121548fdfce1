pub mod add;
pub mod agenda;
pub mod clear;
pub mod config;
pub mod day;
pub mod delete;
pub mod demo;
pub mod edit;
pub mod month;
pub mod toggle;
pub mod week;

use std::path::PathBuf;

use anyhow::Result;
use daybook_core::config::DaybookConfig;
use daybook_core::event::LABEL_PALETTE;
use daybook_core::{CalendarStore, Label};
use dialoguer::Input;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::storage;

/// Config plus the loaded store, shared by every command.
pub struct App {
    pub config: DaybookConfig,
    pub store: CalendarStore,
    events_path: PathBuf,
}

impl App {
    /// Load the events file named by `config`.
    pub fn load(config: DaybookConfig) -> Result<Self> {
        let events_path = config.events_path();
        let events = storage::load_events(&events_path)?;

        let mut store = CalendarStore::new();
        store.set_events_by_date(events);
        debug!(path = %events_path.display(), events = store.event_count(), "loaded store");

        Ok(App {
            config,
            store,
            events_path,
        })
    }

    pub fn save(&self) -> Result<()> {
        storage::save_events(&self.events_path, self.store.events_by_date())
    }
}

/// Look up a palette label. Blank means no label.
pub fn resolve_label(name: &str) -> Result<Option<Label>> {
    if name.trim().is_empty() {
        return Ok(None);
    }

    Label::from_palette(name).map(Some).ok_or_else(|| {
        let available: Vec<_> = LABEL_PALETTE.iter().map(|(n, _)| *n).collect();
        anyhow::anyhow!(
            "Unknown label '{}'. Available: {}",
            name,
            available.join(", ")
        )
    })
}

/// Prompt for an optional value, retrying on parse errors. Empty input
/// skips.
fn prompt_optional<T, F>(prompt: &str, parse: F) -> Result<Option<T>>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(None);
        }
        match parse(&input) {
            Ok(result) => return Ok(Some(result)),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
