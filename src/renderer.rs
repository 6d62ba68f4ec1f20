use image::RgbaImage;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::assets::{Sprite, SpriteCatalog};
use crate::entities::{Fruit, FruitManager, GameState};
use crate::viewport::Viewport;

const BACKGROUND: Color = Color::Rgb(24, 32, 48);

/// Alpha below which a bitmap pixel is left as background
const ALPHA_CUTOFF: u8 = 128;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub fruits: &'a FruitManager,
    pub sprites: &'a SpriteCatalog,
    pub score: u32,
    pub time_remaining: u64,
    /// Score of the round that just ended; None on the title screen
    pub last_score: Option<u32>,
    pub area: Rect,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::AwaitingStart | GameState::GameOver => self.render_modal(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let viewport = Viewport::new(area);

        frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

        let buffer = frame.buffer_mut();
        for fruit in view.fruits.drawable() {
            if let Some(sprite) = view.sprites.get(fruit.kind, fruit.sprite) {
                draw_fruit(buffer, &viewport, fruit, sprite);
            }
        }

        // HUD: score on the first line, time below it
        let score_line = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let time_line = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", view.time_remaining),
                if view.time_remaining > 10 {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
        ]);

        let hud_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(2),
        };
        frame.render_widget(Paragraph::new(vec![score_line, time_line]), hud_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[Mouse: Slice] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the title screen, or the game-over screen when a score is known
    fn render_modal(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        let mut text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║       FRUIT NINJA!        ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
        ];

        if let Some(score) = view.last_score {
            text.push(
                Line::from(format!("Score : {}", score))
                    .centered()
                    .yellow()
                    .bold(),
            );
            text.push(Line::from(""));
        }

        text.push(Line::from("Press any key to begin!").centered().white());
        text.push(Line::from("Press Q to quit").centered().white());

        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().bg(BACKGROUND))
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// Paints a fruit's sprite into the cells its hit box covers
fn draw_fruit(buffer: &mut Buffer, viewport: &Viewport, fruit: &Fruit, sprite: &Sprite) {
    let (x, y, width, height) = fruit.hit_box();
    let (cols, rows) = viewport.span(width, height);
    let origin = viewport.cell_origin(x, y);

    match sprite {
        Sprite::Glyph { lines, color } => {
            let style = Style::default().fg(*color).add_modifier(Modifier::BOLD);
            for (row, line) in lines.iter().enumerate().take(rows as usize) {
                for (col, ch) in line.chars().enumerate().take(cols as usize) {
                    if ch == ' ' {
                        continue;
                    }
                    let cell_x = origin.0 + col as i32;
                    let cell_y = origin.1 + row as i32;
                    if let Some(cell) = visible_cell(buffer, viewport, cell_x, cell_y) {
                        cell.set_char(ch).set_style(style);
                    }
                }
            }
        }
        Sprite::Bitmap(image) => {
            // Each cell shows two stacked pixels using a half block
            for row in 0..rows {
                for col in 0..cols {
                    let top = sample(image, col, row * 2, cols, rows * 2);
                    let bottom = sample(image, col, row * 2 + 1, cols, rows * 2);
                    let cell_x = origin.0 + col as i32;
                    let cell_y = origin.1 + row as i32;
                    let Some(cell) = visible_cell(buffer, viewport, cell_x, cell_y) else {
                        continue;
                    };
                    match (top, bottom) {
                        (Some(top), Some(bottom)) => {
                            cell.set_char('▀').set_fg(top).set_bg(bottom);
                        }
                        (Some(top), None) => {
                            cell.set_char('▀').set_fg(top);
                        }
                        (None, Some(bottom)) => {
                            cell.set_char('▄').set_fg(bottom);
                        }
                        (None, None) => {}
                    }
                }
            }
        }
    }
}

fn visible_cell<'b>(
    buffer: &'b mut Buffer,
    viewport: &Viewport,
    x: i32,
    y: i32,
) -> Option<&'b mut ratatui::buffer::Cell> {
    let area = viewport.area;
    let inside = x >= area.x as i32
        && x < (area.x + area.width) as i32
        && y >= area.y as i32
        && y < (area.y + area.height) as i32;
    if !inside {
        return None;
    }
    buffer.cell_mut((x as u16, y as u16))
}

/// Nearest-neighbour sample of an image stretched over a grid of `grid_w` by `grid_h`
fn sample(image: &RgbaImage, gx: u16, gy: u16, grid_w: u16, grid_h: u16) -> Option<Color> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }
    let px = (gx as u32 * width / grid_w.max(1) as u32).min(width - 1);
    let py = (gy as u32 * height / grid_h.max(1) as u32).min(height - 1);
    let [r, g, b, a] = image.get_pixel(px, py).0;
    (a >= ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FruitKind, SpriteVariant};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<Vec<_>>()
            .join("")
    }

    fn manager_with_orange_at(x: f32, y: f32) -> FruitManager {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut manager = FruitManager::new(&[FruitKind::Orange], &mut rng);
        let orange = manager.get_mut(FruitKind::Orange).unwrap();
        orange.x = x;
        orange.y = y;
        orange.thrown = true;
        manager
    }

    fn draw(view_state: GameState, manager: &FruitManager, sprites: &SpriteCatalog, last_score: Option<u32>) -> Buffer {
        let backend = TestBackend::new(80, 25);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game_state: view_state,
                    fruits: manager,
                    sprites,
                    score: 7,
                    time_remaining: 42,
                    last_score,
                    area: frame.area(),
                };
                GameRenderer::new().render(frame, &view);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_hud_shows_score_and_time() {
        let manager = manager_with_orange_at(400.0, 200.0);
        let buffer = draw(GameState::Playing, &manager, &SpriteCatalog::builtin(), None);
        let text = buffer_text(&buffer);
        assert!(text.contains("Score: 7"));
        assert!(text.contains("Time: 42"));
    }

    #[test]
    fn test_glyph_drawn_at_fruit_cell() {
        let manager = manager_with_orange_at(400.0, 200.0);
        let buffer = draw(GameState::Playing, &manager, &SpriteCatalog::builtin(), None);
        // Orange glyph row 1 is " (oo) "; x=400 -> col 40, y=200 -> row 10
        assert_eq!(buffer[(41, 11)].symbol(), "(");
        assert_eq!(buffer[(42, 11)].symbol(), "o");
    }

    #[test]
    fn test_bitmap_drawn_as_half_blocks() {
        let manager = manager_with_orange_at(400.0, 200.0);
        let dir = std::env::temp_dir().join(format!("fruit-slice-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .save(dir.join("orange.png"))
            .unwrap();
        RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]))
            .save(dir.join("half_orange.png"))
            .unwrap();
        let sprites = SpriteCatalog::load(
            &crate::assets::ImageDirResolver::new(&dir),
            &[FruitKind::Orange],
        )
        .unwrap();

        let buffer = draw(GameState::Playing, &manager, &sprites, None);
        let cell = &buffer[(40, 10)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_fruit_above_playfield_is_clipped() {
        let manager = manager_with_orange_at(400.0, -200.0);
        // Must not panic when the sprite lies outside the buffer
        let buffer = draw(GameState::Playing, &manager, &SpriteCatalog::builtin(), None);
        assert!(!buffer_text(&buffer).contains("(oo)"));
    }

    #[test]
    fn test_title_screen_hides_score() {
        let manager = manager_with_orange_at(400.0, 200.0);
        let buffer = draw(GameState::AwaitingStart, &manager, &SpriteCatalog::builtin(), None);
        let text = buffer_text(&buffer);
        assert!(text.contains("FRUIT NINJA!"));
        assert!(!text.contains("Score :"));
    }

    #[test]
    fn test_game_over_screen_shows_last_score() {
        let manager = manager_with_orange_at(400.0, 200.0);
        let buffer = draw(GameState::GameOver, &manager, &SpriteCatalog::builtin(), Some(12));
        let text = buffer_text(&buffer);
        assert!(text.contains("FRUIT NINJA!"));
        assert!(text.contains("Score : 12"));
    }

    #[test]
    fn test_sliced_variant_is_looked_up() {
        let sprites = SpriteCatalog::builtin();
        let mut manager = manager_with_orange_at(400.0, 200.0);
        manager.handle_hit(FruitKind::Orange);
        assert_eq!(
            manager.get(FruitKind::Orange).unwrap().sprite,
            SpriteVariant::Sliced
        );
        let buffer = draw(GameState::Playing, &manager, &sprites, None);
        // Sliced orange row 1 is " (o/o)"
        assert_eq!(buffer[(43, 11)].symbol(), "/");
    }
}
