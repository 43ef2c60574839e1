//! Animated bonsai viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`GrowthEngine`] and
//! implements [`eframe::App`] to step it on a timer and draw its grid.

use bonsai_core::{Config, ConfigError, Grid, GrowthEngine, Style};
use eframe::App;
use egui::{Color32, FontId, TextFormat, text::LayoutJob};
use tracing::info;

const BRANCH_COLOR: Color32 = Color32::from_rgb(0xA0, 0x6A, 0x3C);
const LEAF_COLOR: Color32 = Color32::from_rgb(0x6C, 0xC2, 0x4A);
const POT_COLOR: Color32 = Color32::from_rgb(0x9A, 0x9A, 0x9A);
const GLYPH_SIZE: f32 = 14.0;

/// Main application state for the viewer.
///
/// The per-frame update is:
/// 1. Handle the control buttons.
/// 2. If `running` is `true` and `step_interval` has passed, call
///    [`Viewer::step_once`].
/// 3. Draw the grid as colored monospace text.
///
/// ### Fields
/// - `engine` - The growth simulation being animated.
/// - `running` - Whether the simulation is auto-advancing.
/// - `step_interval` - Target delay between automatic steps (seconds).
/// - `last_step_time` - Time stamp of the last step (egui time).
/// - `last_step_dt` - Actual delay between the last two steps (display only).
pub struct Viewer {
    engine: GrowthEngine,

    running: bool,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
}

impl Viewer {
    /// Creates a viewer with a freshly seeded tree that starts growing
    /// right away.
    ///
    /// ### Returns
    /// A [`Viewer`] ready for `eframe::run_native`, or the
    /// [`ConfigError`] that rejected `cfg`.
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        let mut engine = GrowthEngine::new(cfg)?;
        engine.seed();

        Ok(Self {
            engine,
            running: true,
            step_interval: 0.04,
            last_step_time: 0.0,
            last_step_dt: 0.0,
        })
    }

    /// Throws the current tree away and starts a new one.
    ///
    /// The configuration and timing are kept; auto-running resumes.
    fn regrow(&mut self) {
        self.engine.reset();
        self.engine.seed();
        self.last_step_time = 0.0;
        self.running = true;
    }

    /// Advances the simulation by a single step and stops auto-running
    /// once nothing is left to grow.
    fn step_once(&mut self) {
        if !self.engine.advance_step() {
            if self.running {
                info!(ticks = self.engine.tick(), "Growth complete");
            }
            self.running = false;
        }
    }

    fn style_color(style: Style) -> Color32 {
        match style {
            Style::Branch => BRANCH_COLOR,
            Style::Leaf => LEAF_COLOR,
            Style::Pot => POT_COLOR,
        }
    }

    /// Lays out the grid as one text job, merging runs of equally styled
    /// cells into a single section.
    fn grid_layout_job(grid: &Grid) -> LayoutJob {
        let font = FontId::monospace(GLYPH_SIZE);
        let mut job = LayoutJob::default();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        let flush = |job: &mut LayoutJob, run: &mut String, style: Option<Style>| {
            if run.is_empty() {
                return;
            }
            let color = style.map_or(Color32::TRANSPARENT, Self::style_color);
            job.append(run, 0.0, TextFormat::simple(font.clone(), color));
            run.clear();
        };

        for row in grid.iter_rows() {
            for cell in row {
                let style = cell.map(|c| c.style);
                if style != run_style {
                    flush(&mut job, &mut run, run_style);
                    run_style = style;
                }
                run.push(cell.map_or(' ', |c| c.symbol));
            }
            run.push('\n');
        }
        flush(&mut job, &mut run, run_style);
        job
    }

    /// Builds the top panel (run controls, stepping, timing).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = now - self.last_step_time;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                if ui.button("Regrow").clicked() {
                    self.regrow();
                }

                ui.separator();
                ui.add(
                    egui::Slider::new(&mut self.step_interval, 0.01..=0.5)
                        .text("step delay (s)"),
                );
            });
        });
    }

    /// Builds the bottom status bar (tick, live agents, painted cells).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("painted = {}", self.engine.grid().painted_cells()));
                ui.label(format!("live branches = {}", self.engine.agents().len()));
                ui.label(format!("tick = {}", self.engine.tick()));
            });
        });
    }

    /// Builds the central panel holding the bonsai.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let job = Self::grid_layout_job(self.engine.grid());
            ui.add(egui::Label::new(job).wrap_mode(egui::TextWrapMode::Extend));

            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
