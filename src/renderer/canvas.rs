//! Canvas 2D renderer for the browser

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Hud, Renderer, Sprite};
use crate::consts::*;
use crate::sim::{PowerUpKind, Rect};

const BACKGROUND: &str = "assets/space-bg.png";

fn asset_path(sprite: Sprite) -> Option<String> {
    let path = match sprite {
        Sprite::Ship => "assets/player-ship.png".to_string(),
        Sprite::ShipExplosion(frame) => format!("assets/ship-explode-s{}.png", frame + 1),
        Sprite::Bullet => "assets/laser.png".to_string(),
        Sprite::Asteroid(variant) => format!("assets/asteroid-medium-v{}.png", variant + 1),
        Sprite::AsteroidDebris { frame, .. } => {
            format!("assets/asteroid-medium-destroyed-s{}.png", frame.min(2) + 1)
        }
        // Drawn as primitives
        Sprite::LargeAsteroid | Sprite::PowerUp(_) => return None,
    };
    Some(path)
}

/// Every image the game can draw, for preloading
fn all_sprites() -> Vec<Sprite> {
    let mut sprites = vec![Sprite::Ship, Sprite::Bullet];
    sprites.extend((0..EXPLOSION_FRAMES).map(Sprite::ShipExplosion));
    sprites.extend((0..2).map(Sprite::Asteroid));
    sprites.extend((0..SMALL_DESTROY_FRAMES).map(|frame| Sprite::AsteroidDebris {
        large: false,
        frame,
    }));
    sprites
}

fn load_image(src: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(src);
    Some(img)
}

fn is_ready(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    background: Option<HtmlImageElement>,
    images: HashMap<String, HtmlImageElement>,
    health_bars: Vec<Option<HtmlImageElement>>,
}

impl CanvasRenderer {
    /// Attach to a canvas and start loading every sprite
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        ctx.set_image_smoothing_enabled(false);

        let mut images = HashMap::new();
        for path in all_sprites().into_iter().filter_map(asset_path) {
            if let Some(img) = load_image(&path) {
                images.insert(path, img);
            }
        }
        let health_bars = (0..=HEALTH_CAP)
            .map(|level| load_image(&format!("assets/health-bar-{}.png", level)))
            .collect();

        log::info!("Canvas renderer ready ({} sprites)", images.len());
        Some(Self {
            ctx,
            background: load_image(BACKGROUND),
            images,
            health_bars,
        })
    }

    fn draw_image(&self, img: &HtmlImageElement, rect: Rect) -> bool {
        if !is_ready(img) {
            return false;
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            )
            .is_ok()
    }

    fn draw_large_asteroid(&self, rect: Rect) {
        let r = (rect.size.x / 2.0) as f64;
        self.ctx.set_fill_style_str("#7a6a5a");
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            rect.pos.x as f64 + r,
            rect.pos.y as f64 + r,
            r,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn draw_power_up(&self, kind: PowerUpKind, rect: Rect) {
        let (color, label) = match kind {
            PowerUpKind::FireRate => ("#ffcc33", "F"),
            PowerUpKind::Health => ("#33dd66", "+"),
        };
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
        self.ctx.set_fill_style_str("#000");
        self.ctx.set_font("bold 14px monospace");
        let _ = self.ctx.fill_text(
            label,
            rect.pos.x as f64 + 6.0,
            rect.pos.y as f64 + rect.size.y as f64 - 5.0,
        );
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self) {
        self.ctx.set_fill_style_str("#000");
        self.ctx
            .fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);
    }

    fn draw_background(&mut self, scroll_x: f32) {
        let Some(bg) = &self.background else { return };
        // Two copies side by side cover the wrap seam
        self.draw_image(bg, Rect::new(scroll_x, 0.0, GAME_WIDTH, GAME_HEIGHT));
        self.draw_image(
            bg,
            Rect::new(scroll_x + GAME_WIDTH, 0.0, GAME_WIDTH, GAME_HEIGHT),
        );
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> bool {
        match sprite {
            Sprite::LargeAsteroid => {
                self.draw_large_asteroid(rect);
                true
            }
            Sprite::PowerUp(kind) => {
                self.draw_power_up(kind, rect);
                true
            }
            _ => asset_path(sprite)
                .and_then(|path| self.images.get(&path))
                .is_some_and(|img| self.draw_image(img, rect)),
        }
    }

    fn draw_hud(&mut self, hud: &Hud) {
        let level = hud.health.min(hud.health_cap) as usize;
        if let Some(Some(bar)) = self.health_bars.get(level) {
            self.draw_image(
                bar,
                Rect::new(
                    HEALTH_BAR_MARGIN,
                    HEALTH_BAR_MARGIN,
                    HEALTH_BAR_WIDTH,
                    HEALTH_BAR_HEIGHT,
                ),
            );
        }

        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_font("13px monospace");
        let text_x = (HEALTH_BAR_MARGIN * 2.0 + HEALTH_BAR_WIDTH) as f64;
        let _ = self.ctx.fill_text(
            &format!("FIRE {}/{}", hud.fire_rate, hud.fire_rate_cap),
            text_x,
            22.0,
        );
        let _ = self
            .ctx
            .fill_text(&format!("SCORE {}", hud.score), text_x, 40.0);
    }
}
