//! Effect execution layer.
//!
//! Translates the application's [`Effect`]s into imperative [`Cmd`]s and
//! runs them. State updates stay pure in `app`; everything that touches the
//! outside world (the system clipboard) happens here.

use tracing::warn;

use crate::app::{App, Effect};

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Write text into the system clipboard, acknowledging on the slot.
    ClipboardSet { slot: usize, text: String },
}

/// Convert application [`Effect`]s into [`Cmd`] instances.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .map(|effect| match effect {
            Effect::CopyHexRequested { slot, text } => Cmd::ClipboardSet { slot, text },
        })
        .collect()
}

/// Execute commands, recording outcomes on the app.
///
/// Clipboard failures are deliberately quiet: they are logged and noted in
/// the log panel, with no modal interruption.
pub fn run_cmds(app: &mut App, cmds: Vec<Cmd>) {
    for cmd in cmds {
        match cmd {
            Cmd::ClipboardSet { slot, text } => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        app.mark_copied(slot);
                        app.push_log(format!("Copied {text} to clipboard"));
                    }
                    Err(error) => {
                        warn!("clipboard write failed: {error}");
                        app.push_log(format!("Clipboard error: {error}"));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_translate_to_clipboard_commands() {
        let cmds = from_effects(vec![Effect::CopyHexRequested {
            slot: 4,
            text: "#A1B2C3".into(),
        }]);
        assert_eq!(
            cmds,
            vec![Cmd::ClipboardSet {
                slot: 4,
                text: "#A1B2C3".into()
            }]
        );
    }
}
