//! Flower viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns one simulated flower and its
//! wind field, drives them from the frame clock, and draws a read-only
//! snapshot of the stem and petals every frame.

use bloom_core::{
    BloomMode, Environment, Flower, Settings, WindField, clamp_dt,
    error::ConfigError,
    petal::Petal,
    rng::create_rng,
    stem::StemSegment,
};
use eframe::App;
use glam::Vec2;
use rand::{Rng, rng};
use tracing::info;

/// Pixels between the bottom of the canvas and the flower's root.
const GROUND_MARGIN: f32 = 40.0;

/// Fixed step used by the "Step" button.
const MANUAL_STEP: f32 = 1.0 / 60.0;

/// Petal palette, one per flower variety.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variation {
    Red,
    Purple,
    Green,
}

impl Variation {
    const ALL: [Variation; 3] = [Variation::Red, Variation::Purple, Variation::Green];

    fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    fn petal_color(self) -> egui::Color32 {
        match self {
            Variation::Red => egui::Color32::from_rgb(220, 60, 70),
            Variation::Purple => egui::Color32::from_rgb(150, 80, 200),
            Variation::Green => egui::Color32::from_rgb(120, 200, 110),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Variation::Red => "red",
            Variation::Purple => "purple",
            Variation::Green => "green",
        }
    }
}

/// Main application state for the viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions (run/pause, step, reset, camera).
/// 2. If `running` is `true`, clamp the frame delta and call [`Viewer::step`].
/// 3. Render stem, petals and the wind indicator.
///
/// ### Fields
/// - `flower` - The simulated plant.
/// - `wind` - Wind field shared by the flower and the wind indicator.
/// - `settings` - Settings the flower and wind were built from.
/// - `seed` - Seed of the current run, shown so a run can be reproduced.
/// - `variation` - Petal palette.
///
/// - `rng` - Source of fresh seeds on reset.
///
/// - `running` - Whether the simulation is advancing with the frame clock.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `sim_time` - Simulated seconds, fed to the wind field.
/// - `last_frame_time` - Time stamp of the last frame (egui time).
/// - `last_dt` - Clamped delta of the last step (for display only).
pub struct Viewer {
    flower: Flower,
    wind: WindField,
    settings: Settings,
    seed: u64,
    variation: Variation,

    rng: rand::rngs::ThreadRng,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    sim_time: f32,
    last_frame_time: f64,
    last_dt: f32,
}

impl Viewer {
    /// Creates a viewer with a freshly planted flower at the world origin.
    ///
    /// If `settings.seed` is set, the flower, wind and palette are
    /// reproducible; otherwise a random seed is drawn.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let mut rng = rng();
        let seed = settings.seed.unwrap_or_else(|| rng.random());
        let (flower, wind, variation) = plant(&settings, seed)?;
        info!(seed, variation = variation.label(), "flower planted");

        Ok(Self {
            flower,
            wind,
            settings,
            seed,
            variation,
            rng,
            running: true,
            zoom: 1.5,
            pan: egui::vec2(0.0, 0.0),
            sim_time: 0.0,
            last_frame_time: 0.0,
            last_dt: 0.0,
        })
    }

    /// Replants the flower, keeping settings and camera.
    ///
    /// A configured seed replays the same run; otherwise a new seed is drawn.
    fn reset(&mut self) -> Result<(), ConfigError> {
        let seed = self.settings.seed.unwrap_or_else(|| self.rng.random());
        let (flower, wind, variation) = plant(&self.settings, seed)?;
        self.flower = flower;
        self.wind = wind;
        self.variation = variation;
        self.seed = seed;
        self.sim_time = 0.0;
        self.last_dt = 0.0;
        info!(seed, variation = variation.label(), "flower replanted");
        Ok(())
    }

    /// Advances the simulation by `dt` seconds of simulated time.
    ///
    /// `dt` is clamped with [`clamp_dt`] first, so a long stall (window
    /// hidden, debugger pause) turns into one short step.
    fn step(&mut self, dt: f32) {
        let dt = clamp_dt(dt);
        self.sim_time += dt;
        let env = Environment {
            gravity: self.settings.gravity,
            wind: &self.wind,
            time: self.sim_time,
        };
        self.flower.update(dt, &env);
        self.last_dt = dt;
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World space already has +y pointing down, so there is no flip; the
    /// world origin sits `GROUND_MARGIN` pixels above the bottom center of
    /// `rect`, shifted by `pan`.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let origin = egui::pos2(rect.center().x, rect.bottom() - GROUND_MARGIN);
        egui::pos2(
            origin.x + p.x * self.zoom + self.pan.x,
            origin.y + p.y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let origin = egui::pos2(rect.center().x, rect.bottom() - GROUND_MARGIN);
        Vec2::new(
            (p.x - origin.x - self.pan.x) / self.zoom,
            (p.y - origin.y - self.pan.y) / self.zoom,
        )
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                    self.last_frame_time = ctx.input(|i| i.time);
                }

                if ui.button("Step").clicked() {
                    self.step(MANUAL_STEP);
                }

                if ui.button("Replant").clicked()
                    && let Err(e) = self.reset()
                {
                    tracing::warn!(error = %e, "replant failed");
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.2..=6.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (ages, counts, seed).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.3} s", self.last_dt));
                ui.separator();
                ui.label(format!("seed = {}", self.seed));
                ui.label(format!("petals = {}", self.flower.petals().len()));
                ui.label(format!("segments = {}", self.flower.segments().len()));
                ui.separator();
                ui.label(format!("bloom = {:.2}", self.flower.bloom_factor()));
                ui.label(format!("age = {:.2}", self.flower.structural_age()));
            });
        });
    }

    /// Builds the right-hand panel: bloom override and a read-out of the
    /// flower's state.
    fn ui_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("state_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Flower");

                ui.separator();
                let mut mode = self.flower.bloom_mode();
                egui::ComboBox::from_label("Bloom")
                    .selected_text(format!("{mode:?}"))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut mode, BloomMode::Natural, "Natural");
                        ui.selectable_value(&mut mode, BloomMode::Forced, "Forced");
                        ui.selectable_value(&mut mode, BloomMode::Suppressed, "Suppressed");
                    });
                if mode != self.flower.bloom_mode() {
                    self.flower.set_bloom_mode(mode);
                }

                ui.separator();
                ui.label(format!("variety: {}", self.variation.label()));
                ui.label(format!("next spawn at age {:.2}", self.flower.next_spawn_age()));

                ui.separator();
                ui.label("Segments");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (i, seg) in self.flower.segments().iter().enumerate() {
                        ui.label(format!(
                            "#{i}: len {:.1}/{:.0} flex {:.2} m {:.2}",
                            seg.current_rest_length,
                            seg.target_rest_length,
                            seg.current_flexibility,
                            seg.mass
                        ));
                    }
                });
            });
    }

    /// Builds the central panel where the flower is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.2, 6.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            self.draw_ground(&painter, rect);
            self.draw_wind_indicator(&painter, rect);
            self.draw_stem(&painter, rect);
            self.draw_petals(&painter, rect);

            // Advance with the frame clock.
            let now = ctx.input(|i| i.time);
            if self.running {
                if self.last_frame_time > 0.0 {
                    self.step((now - self.last_frame_time) as f32);
                }
                ctx.request_repaint();
            }
            self.last_frame_time = now;
        });
    }

    fn draw_ground(&self, painter: &egui::Painter, rect: egui::Rect) {
        let y = self.world_to_screen(Vec2::ZERO, rect).y;
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            egui::Stroke::new(1.0, egui::Color32::from_rgb(110, 90, 60)),
        );
    }

    /// Arrow in the top-left corner showing the wind at the root right now.
    fn draw_wind_indicator(&self, painter: &egui::Painter, rect: egui::Rect) {
        let root = self.flower.segments()[0].position;
        let force = self.wind.get_force(root, self.sim_time);
        let origin = rect.left_top() + egui::vec2(60.0, 40.0);
        painter.arrow(
            origin,
            egui::vec2(force.x, force.y),
            egui::Stroke::new(1.5, egui::Color32::LIGHT_BLUE),
        );
    }

    fn draw_stem(&self, painter: &egui::Painter, rect: egui::Rect) {
        let segments = self.flower.segments();
        let loads = downstream_loads(segments, self.flower.petals());
        let color = egui::Color32::from_rgb(70, 140, 60);

        for (i, seg) in segments.iter().enumerate() {
            let Some(parent) = seg.parent else {
                continue;
            };
            let a = self.world_to_screen(segments[parent].position, rect);
            let b = self.world_to_screen(seg.position, rect);
            let width = stem_width(loads[i]) * self.zoom;
            painter.line_segment([a, b], egui::Stroke::new(width, color));
        }

        let root = self.world_to_screen(segments[0].position, rect);
        painter.circle_filled(root, 3.0 * self.zoom, egui::Color32::from_rgb(90, 70, 40));
    }

    fn draw_petals(&self, painter: &egui::Painter, rect: egui::Rect) {
        let segments = self.flower.segments();
        let base = self.variation.petal_color();

        for petal in self.flower.petals() {
            let anchor = self.world_to_screen(segments[petal.anchor].position, rect);
            let tip = self.world_to_screen(petal.tip_position, rect);
            let alpha = (120.0 + 135.0 * petal.openness) as u8;
            let color = egui::Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha);
            let width = (2.0 + 4.0 * petal.openness) * self.zoom;
            painter.line_segment([anchor, tip], egui::Stroke::new(width, color));
            painter.circle_filled(tip, width * 0.6, color);
        }
    }
}

/// Plants a flower, its wind and its palette from one seed.
fn plant(settings: &Settings, seed: u64) -> Result<(Flower, WindField, Variation), ConfigError> {
    let mut rng = create_rng(seed);
    let flower = Flower::with_rng(Vec2::ZERO, settings.flower, create_rng(rng.random()))?;
    let wind = WindField::new(settings.wind, &mut rng)?;
    let variation = Variation::random(&mut rng);
    Ok((flower, wind, variation))
}

/// Mass carried by each segment: its own, every segment above it, and every
/// petal hanging at or above it.
///
/// The stem is a single chain, so the load of segment `i` is a suffix sum.
pub fn downstream_loads(segments: &[StemSegment], petals: &[Petal]) -> Vec<f32> {
    let mut own: Vec<f32> = segments.iter().map(|s| s.mass).collect();
    for petal in petals {
        own[petal.anchor] += petal.mass;
    }

    let mut loads = vec![0.0; segments.len()];
    let mut acc = 0.0;
    for i in (0..segments.len()).rev() {
        acc += own[i];
        loads[i] = acc;
    }
    loads
}

/// Stroke width in world units for a segment carrying `load`.
fn stem_width(load: f32) -> f32 {
    1.5 + load.sqrt() * 1.2
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_side_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
