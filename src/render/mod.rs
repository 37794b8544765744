//! Rendering: a pure projection of engine output
//!
//! Cell value to display text and colors, status to banner text, plus the
//! wasm-only pass that writes them into the DOM. This layer reads engine
//! state and never mutates it.

use crate::engine::GameStatus;

/// Tile background colors, ripped from the classic game's stylesheet.
const PALETTE: [(u32, &str); 11] = [
    (2, "#EEE4DA"),
    (4, "#eee1c9"),
    (8, "#f3b27a"),
    (16, "#f69664"),
    (32, "#f77c5f"),
    (64, "#f75f3b"),
    (128, "#edd073"),
    (256, "#edcc62"),
    (512, "#edc950"),
    (1024, "#edc53f"),
    (2048, "#edc22e"),
];

/// Background for empty cells and values beyond the palette.
pub const BACKGROUND_COLOR: &str = "#bdac97";
/// Text color for the two lightest tiles.
pub const TEXT_COLOR: &str = "#756452";
/// Text color for everything else.
pub const TEXT_COLOR_ALT: &str = "#ffffff";

/// Display text for a cell; empty cells render as nothing.
pub fn tile_text(value: u32) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// Background color for a cell value.
pub fn tile_background(value: u32) -> &'static str {
    PALETTE
        .iter()
        .find(|&&(v, _)| v == value)
        .map(|&(_, color)| color)
        .unwrap_or(BACKGROUND_COLOR)
}

/// Text color for a cell value. The light 2 and 4 tiles carry dark text;
/// high-contrast mode darkens it further to pure black.
pub fn tile_text_color(value: u32, high_contrast: bool) -> &'static str {
    match value {
        2 | 4 if high_contrast => "#000000",
        2 | 4 => TEXT_COLOR,
        _ => TEXT_COLOR_ALT,
    }
}

/// Banner text for the win/loss message area.
pub fn banner_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won => "You won!!!",
        GameStatus::Lost => "You lost :(((",
        GameStatus::Playing => "",
    }
}

/// Write the whole game view into the page: one `.game-tile` element per
/// cell (row-major), the score sum and the win/loss banner.
#[cfg(target_arch = "wasm32")]
pub fn render(document: &web_sys::Document, game: &crate::engine::Game, high_contrast: bool) {
    use wasm_bindgen::JsCast;

    let Ok(tiles) = document.query_selector_all(".game-tile") else {
        log::warn!("no .game-tile elements to render into");
        return;
    };

    for (idx, &value) in game.board().cells().iter().enumerate() {
        let Some(tile) = tiles
            .item(idx as u32)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        tile.set_text_content(Some(&tile_text(value)));
        let _ = tile.set_attribute(
            "style",
            &format!(
                "background-color:{};color:{}",
                tile_background(value),
                tile_text_color(value, high_contrast)
            ),
        );
    }

    if let Some(el) = document.query_selector("#score-sum").ok().flatten() {
        el.set_text_content(Some(&game.score().to_string()));
    }

    if let Some(el) = document.query_selector(".win-loss-msg").ok().flatten() {
        el.set_text_content(Some(banner_text(game.status())));
    }
}
