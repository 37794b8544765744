//! Merge 2048 entry point
//!
//! Platform glue only: maps raw input to engine commands and re-renders
//! from engine output after every accepted command. Events are serialized
//! through one shared game instance, so each move is fully applied and
//! drawn before the next one is looked at.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use merge_2048::engine::{Game, GameStatus};
    use merge_2048::input::{Command, map_key};
    use merge_2048::render;
    use merge_2048::{HighScores, Settings};

    /// Everything the event handlers share
    struct App {
        game: Game,
        settings: Settings,
        highscores: HighScores,
        /// Set once the current run's outcome has been recorded
        outcome_recorded: bool,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let game = Game::with_config(settings.game_config(), seed);
            Self {
                game,
                settings,
                highscores: HighScores::load(),
                outcome_recorded: false,
            }
        }

        fn restart(&mut self, seed: u64) {
            self.game.restart(seed);
            self.outcome_recorded = false;
            log::info!("Game restarted with seed: {seed}");
        }

        /// Push a finished run onto the leaderboard, once.
        fn record_outcome(&mut self) {
            if self.outcome_recorded || self.game.status() == GameStatus::Playing {
                return;
            }
            let score = self.game.score();
            let highest = self.game.board().highest_tile();
            if let Some(rank) = self.highscores.add_score(score, highest, js_sys::Date::now()) {
                log::info!("New high score: {score} (rank {rank})");
                self.highscores.save();
            }
            self.outcome_recorded = true;
        }

        fn render(&self) {
            let document = web_sys::window().unwrap().document().unwrap();
            render::render(&document, &self.game, self.settings.high_contrast);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Merge 2048 starting...");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Game initialized with seed: {seed}");

        setup_keyboard(app.clone());
        setup_restart_button(app.clone());

        app.borrow().render();

        log::info!("Merge 2048 running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(command) = map_key(&event.key()) else {
                return;
            };
            // Captured keys never reach the page; arrows would scroll it
            event.prevent_default();

            let mut app = app.borrow_mut();
            match command {
                Command::Move(dir) => {
                    app.game.apply_move(dir);
                    app.record_outcome();
                }
                Command::Restart => {
                    app.restart(js_sys::Date::now() as u64);
                }
            }
            app.render();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut app = app.borrow_mut();
                app.restart(js_sys::Date::now() as u64);
                app.render();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::{self, BufRead};

    use merge_2048::engine::{Game, GameStatus};
    use merge_2048::input::{Command, map_key};
    use rand::Rng;

    env_logger::init();

    let mut game = Game::new(rand::rng().random());

    println!("Merge 2048 - w/a/s/d to slide, r to restart, q to quit");
    print_state(&game);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let key = line.trim();
        if key.eq_ignore_ascii_case("q") {
            break;
        }
        match map_key(key) {
            Some(Command::Move(dir)) => {
                let result = game.apply_move(dir);
                if !result.moved && result.status == GameStatus::Playing {
                    println!("(nothing moved)");
                    continue;
                }
            }
            Some(Command::Restart) => {
                game.restart(rand::rng().random());
                println!("New game.");
            }
            None => {
                println!("keys: w/a/s/d move, r restart, q quit");
                continue;
            }
        }
        print_state(&game);
        if game.status() != GameStatus::Playing {
            println!("Press r for a new game, q to quit.");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_state(game: &merge_2048::engine::Game) {
    println!("{}", game.board());
    println!("score: {}", game.score());
    let banner = merge_2048::render::banner_text(game.status());
    if !banner.is_empty() {
        println!("{banner}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
