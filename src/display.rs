//! Rendering layer; all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `Scene`
//! built by the simulation.  No game logic is performed; this module
//! only translates the scene into queued terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use star_dodge::assets;
use star_dodge::game::{Overlay, Scene, Tint};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkGrey;
const C_HUD: Color = Color::White;
const C_HEALTH_HIGH: Color = Color::Green;
const C_HEALTH_MEDIUM: Color = Color::Yellow;
const C_HEALTH_LOW: Color = Color::Red;
const C_PAUSE: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_RESTART_HINT: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Grey => Color::Grey,
        Tint::DarkGrey => Color::DarkGrey,
        Tint::White => Color::White,
        Tint::Yellow => Color::Yellow,
        Tint::Green => Color::Green,
        Tint::Red => Color::Red,
        Tint::Magenta => Color::Magenta,
        Tint::Blue => Color::Blue,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, scene: &Scene) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, scene)?;
    for sprite in &scene.sprites {
        draw_sprite(out, scene, sprite.x, sprite.y, sprite.art, tint_color(sprite.tint))?;
    }
    draw_hud(out, scene)?;
    if let Some(overlay) = &scene.overlay {
        draw_overlay(out, scene, overlay)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Background starfield ──────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, scene: &Scene) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BACKGROUND))?;
    let tile_w = assets::BACKGROUND[0].chars().count();
    for y in 0..scene.viewport.height {
        let row = assets::BACKGROUND[y as usize % assets::BACKGROUND.len()];
        let chars: Vec<char> = row.chars().collect();
        let mut line = String::with_capacity(scene.viewport.width as usize);
        for x in 0..scene.viewport.width {
            let src = (x as usize + scene.scroll_offset) % tile_w;
            line.push(chars[src]);
        }
        out.queue(cursor::MoveTo(0, y))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Draw one sprite, clipping to the viewport; space cells are transparent
/// so the starfield shows through.
fn draw_sprite<W: Write>(
    out: &mut W,
    scene: &Scene,
    x: i32,
    y: i32,
    art: &[&str],
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (row, line) in art.iter().enumerate() {
        let cy = y + row as i32;
        if cy < 0 || cy >= scene.viewport.height as i32 {
            continue;
        }
        for (col, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let cx = x + col as i32;
            if cx < 0 || cx >= scene.viewport.width as i32 {
                continue;
            }
            out.queue(cursor::MoveTo(cx as u16, cy as u16))?;
            out.queue(Print(ch))?;
        }
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, scene: &Scene) -> std::io::Result<()> {
    let health = scene.status.health_percent;
    let health_color = if health > 30.0 {
        C_HEALTH_HIGH
    } else if health > 10.0 {
        C_HEALTH_MEDIUM
    } else {
        C_HEALTH_LOW
    };

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(health_color))?;
    out.queue(Print(format!("Health: {:.0}%", health)))?;

    let right = format!(
        "Level {}  Score {}",
        scene.status.difficulty, scene.status.score
    );
    let x = (scene.viewport.width as usize).saturating_sub(right.chars().count());
    out.queue(cursor::MoveTo(x as u16, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(right))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    scene: &Scene,
    dy: i32,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let cx = scene.viewport.width as i32 / 2;
    let cy = scene.viewport.height as i32 / 2;
    let x = (cx - text.chars().count() as i32 / 2).max(0);
    let y = (cy + dy).max(0);
    out.queue(cursor::MoveTo(x as u16, y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_overlay<W: Write>(out: &mut W, scene: &Scene, overlay: &Overlay) -> std::io::Result<()> {
    match overlay {
        Overlay::Paused => {
            draw_centered(out, scene, -1, C_PAUSE, "=== PAUSED ===")?;
            draw_centered(out, scene, 1, C_PAUSE, "Press P to continue")?;
        }
        Overlay::GameOver { score, level } => {
            draw_centered(out, scene, -2, C_GAME_OVER, "=== GAME OVER ===")?;
            draw_centered(
                out,
                scene,
                0,
                C_HUD,
                &format!("Final Score: {score}  (reached level {level})"),
            )?;
            draw_centered(out, scene, 2, C_RESTART_HINT, "Press R to restart")?;
            draw_centered(out, scene, 3, C_HINT, "Q to quit")?;
        }
    }
    Ok(())
}
