use color_eyre::Result;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use tracing::info;

use crate::assets::SpriteCatalog;
use crate::clock::{Clock, FrameLimiter};
use crate::entities::GameState;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::round::{FrameOutcome, RoundController};
use crate::settings::Settings;
use crate::viewport::Viewport;

/// How a blocking title or game-over screen was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalExit {
    Continue,
    Quit,
}

/// The main application: wires terminal input and drawing around the round
/// controller and runs the frame loop.
pub struct App<C: Clock> {
    running: bool,
    controller: RoundController<C>,
    sprites: SpriteCatalog,
    viewport: Viewport,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    limiter: FrameLimiter,
}

impl<C: Clock> App<C> {
    /// Construct a new instance of [`App`].
    pub fn new(
        settings: &Settings,
        clock: C,
        sprites: SpriteCatalog,
        input_manager: InputManager,
    ) -> Self {
        Self {
            running: true,
            controller: RoundController::new(settings, clock),
            sprites,
            viewport: Viewport::new(Rect::default()),
            input_manager,
            renderer: GameRenderer::new(),
            limiter: FrameLimiter::new(settings.fps),
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if self.show_modal(terminal)? == ModalExit::Quit {
            return Ok(());
        }
        self.controller.start_round();

        while self.running {
            self.input_manager.poll_events()?;
            if self.input_manager.actions().contains(&InputAction::Quit) {
                self.quit();
                break;
            }

            // Update screen dimensions before mapping the pointer
            let size = terminal.size()?;
            self.viewport = Viewport::new(Rect::new(0, 0, size.width, size.height));
            let pointer = self
                .input_manager
                .pointer()
                .map(|(column, row)| self.viewport.to_logical(column, row));

            if let FrameOutcome::RoundOver { .. } = self.controller.step(pointer) {
                if self.show_modal(terminal)? == ModalExit::Quit {
                    self.quit();
                    break;
                }
                self.controller.start_round();
                continue;
            }

            self.draw(terminal)?;
            self.limiter.tick();
        }

        info!(rounds = self.controller.rounds_played(), "leaving game loop");
        Ok(())
    }

    /// Shows the title or game-over screen and waits for continue or quit.
    /// Everything else the terminal reports is dropped.
    fn show_modal<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<ModalExit> {
        self.draw(terminal)?;

        loop {
            self.limiter.tick();
            self.input_manager.poll_events()?;
            for action in self.input_manager.actions() {
                match action {
                    InputAction::Quit => return Ok(ModalExit::Quit),
                    InputAction::Continue => return Ok(ModalExit::Continue),
                }
            }
            // Redraw so a resized terminal still shows the prompt
            self.draw(terminal)?;
        }
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let state = self.controller.state();
        let last_score = match state {
            GameState::GameOver => Some(self.controller.score()),
            _ => None,
        };

        terminal.draw(|frame| {
            let view = RenderView {
                game_state: state,
                fruits: self.controller.fruits(),
                sprites: &self.sprites,
                score: self.controller.score(),
                time_remaining: self.controller.time_remaining(),
                last_score,
                area: frame.area(),
            };
            self.renderer.render(frame, &view);
        })?;
        Ok(())
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
