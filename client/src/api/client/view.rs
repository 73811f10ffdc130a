//! Read-only views over the state of the backend: statistics, history, scores and heatmaps.

use std::str::FromStr;

use nameth::NamedEnumValues as _;
use nameth::nameth;
use serde_json::Value;

use super::CallError;
use super::Method;
use super::Transport;
use super::ViperClient;
use super::call;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Stats,
    Historico,
    ScoresTerminal,
    ScoresPadrao,
    ScoresTerminalPadrao,
    HeatmapTerminal,
    HeatmapRodaEu,
}

impl View {
    pub const ALL: [View; 7] = [
        Self::Stats,
        Self::Historico,
        Self::ScoresTerminal,
        Self::ScoresPadrao,
        Self::ScoresTerminalPadrao,
        Self::HeatmapTerminal,
        Self::HeatmapRodaEu,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Historico => "historico",
            Self::ScoresTerminal => "scores/terminal",
            Self::ScoresPadrao => "scores/padrao",
            Self::ScoresTerminalPadrao => "scores/terminal-padrao",
            Self::HeatmapTerminal => "heatmap/terminal",
            Self::HeatmapRodaEu => "heatmap/roda-eu",
        }
    }

    /// Heatmaps are computed over the last `window` spins.
    pub fn takes_window(self) -> bool {
        matches!(self, Self::HeatmapTerminal | Self::HeatmapRodaEu)
    }

    /// The name of the view on the command line, e.g. `scores-terminal`.
    pub fn name(self) -> String {
        self.path().replace('/', "-")
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for View {
    type Err = ParseViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.name() == s)
            .ok_or_else(|| ParseViewError::UnknownView { name: s.to_owned() })
    }
}

#[nameth]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseViewError {
    #[error("[{n}] Unknown view '{name}'", n = self.name())]
    UnknownView { name: String },
}

/// Fetches a view. `window` is only sent for views that [take one](View::takes_window).
pub async fn view<T: Transport>(
    client: &ViperClient<T>,
    view: View,
    window: Option<u32>,
) -> Result<Value, CallError> {
    let path = match window {
        Some(window) if view.takes_window() => format!("{}?window={window}", view.path()),
        _ => view.path().to_owned(),
    };
    call(client, Method::GET, &path, None).await
}
