//! Desktop preview for pca9685-rgb
//!
//! Drives the driver against an in-memory copy of the chip's register file
//! and plots every channel's PWM waveform over one cycle, together with how
//! many channels are switched on at each tick.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use pca9685_rgb::{
    DEFAULT_GROUPS, DriverConfig, Duration, Fader, GroupLayout, Instant, Intensity, PWM_PERIOD,
    Pca9685Rgb, PhaseOffsets, PwmPair, Transport, TransportError,
    registers::{CHANNEL_COUNT, channel_register},
};

/// Height of one channel row in pixels
const ROW_HEIGHT: f32 = 14.0;

/// Gap between channel rows
const ROW_GAP: f32 = 3.0;

/// Height of the load chart in pixels
const LOAD_HEIGHT: f32 = 120.0;

/// Duration of the "Fade all" transition
const FADE_DURATION: Duration = Duration::from_millis(1500);

/// Blinks per "Blink all" click
const BLINK_COUNT: u16 = 2;

const GREY: egui::Color32 = egui::Color32::from_gray(90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseStrategy {
    /// Groups spread evenly over the cycle
    Even,
    /// Groups start at the slot of their first channel
    PerChannel,
}

impl PhaseStrategy {
    fn offsets(self) -> PhaseOffsets<DEFAULT_GROUPS> {
        match self {
            Self::Even => PhaseOffsets::evenly_spaced(),
            Self::PerChannel => PhaseOffsets::per_channel(3)
                .unwrap_or_else(|error| panic!("invalid preview phases: {error}")),
        }
    }
}

/// Auto-incrementing register file standing in for the chip
#[derive(Clone)]
struct RegisterFile {
    registers: [u8; 256],
    pointer: Option<u8>,
}

impl RegisterFile {
    fn new() -> Self {
        Self {
            registers: [0; 256],
            pointer: None,
        }
    }

    fn pair(&self, channel: u8) -> PwmPair {
        let base = usize::from(channel_register(channel));
        let bytes = &self.registers[base..base + 4];
        PwmPair {
            on: u16::from_le_bytes([bytes[0], bytes[1]]) & 0x0FFF,
            off: u16::from_le_bytes([bytes[2], bytes[3]]) & 0x0FFF,
        }
    }
}

impl Transport for RegisterFile {
    fn begin(&mut self, _address: u8) {
        self.pointer = None;
    }

    fn write(&mut self, byte: u8) {
        match self.pointer {
            None => self.pointer = Some(byte),
            Some(register) => {
                self.registers[usize::from(register)] = byte;
                self.pointer = Some(register.wrapping_add(1));
            }
        }
    }

    fn end(&mut self) -> Result<(), TransportError> {
        self.pointer = None;
        Ok(())
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("PCA9685 RGB Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "pca9685-rgb-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    driver: Pca9685Rgb<RegisterFile, DEFAULT_GROUPS>,
    fader: Fader<DEFAULT_GROUPS>,
    /// Wall-clock reference for fader time
    started: StdInstant,
    /// Color picked for each group
    colors: [[u8; 3]; DEFAULT_GROUPS],
    /// Color picked for all groups at once
    all_color: [u8; 3],
    strategy: PhaseStrategy,
    /// Last driver error, shown under the controls
    status: Option<String>,
}

impl PreviewApp {
    fn new() -> Self {
        let initial = [255, 180, 100];
        let mut app = Self {
            driver: Self::build_driver(PhaseStrategy::Even),
            fader: Fader::new(GroupLayout::Rgb),
            started: StdInstant::now(),
            colors: [initial; DEFAULT_GROUPS],
            all_color: initial,
            strategy: PhaseStrategy::Even,
            status: None,
        };
        app.apply_all();
        app
    }

    fn build_driver(strategy: PhaseStrategy) -> Pca9685Rgb<RegisterFile, DEFAULT_GROUPS> {
        let config = DriverConfig::default().with_phases(strategy.offsets());
        let mut driver = Pca9685Rgb::new(RegisterFile::new(), config)
            .unwrap_or_else(|error| panic!("invalid preview configuration: {error}"));
        let _ = driver.initialize();
        driver
    }

    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> Instant {
        Instant::from_millis(self.started.elapsed().as_millis() as u64)
    }

    /// Write every group's picked color
    fn apply_all(&mut self) {
        let now = self.now();
        for (index, [r, g, b]) in self.colors.into_iter().enumerate() {
            let result = self.fader.fade_group(index, (r, g, b), Duration::from_millis(0), now);
            self.report(result);
        }
    }

    fn change_strategy(&mut self, strategy: PhaseStrategy) {
        self.strategy = strategy;
        self.driver = Self::build_driver(strategy);
        self.fader.invalidate();
    }

    fn fade_all(&mut self) {
        let [r, g, b] = self.all_color;
        self.colors = [self.all_color; DEFAULT_GROUPS];
        let now = self.now();
        let result = self.fader.fade_all(Intensity::rgb(r, g, b), FADE_DURATION, now);
        self.report(result);
    }

    /// Blink every group to the "all groups" color and back
    fn blink_all(&mut self) {
        let [r, g, b] = self.all_color;
        let now = self.now();
        let result = self
            .fader
            .blink_all(Intensity::rgb(r, g, b), FADE_DURATION, BLINK_COUNT, now);
        self.report(result);
    }

    fn report<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        if let Err(error) = result {
            self.status = Some(error.to_string());
        }
    }

    /// Pairs of every chip channel, as currently held by the register file
    fn pairs(&self) -> Vec<PwmPair> {
        let registers = self.driver.transport();
        (0..CHANNEL_COUNT).map(|channel| registers.pair(channel)).collect()
    }
}

/// Channels switched on at every tick of the cycle
fn load_profile(pairs: &[PwmPair]) -> Vec<u8> {
    (0..PWM_PERIOD)
        .map(|tick| {
            let on = pairs.iter().filter(|pair| pair.is_on_at(tick)).count();
            u8::try_from(on).unwrap_or(u8::MAX)
        })
        .collect()
}

/// Load profile the same duties would have with every on edge at tick 0
fn aligned_profile(pairs: &[PwmPair]) -> Vec<u8> {
    let aligned: Vec<PwmPair> = pairs
        .iter()
        .map(|pair| PwmPair::staggered(0, pair.duty()))
        .collect();
    load_profile(&aligned)
}

fn channel_color(channel: u8) -> egui::Color32 {
    match channel % 3 {
        0 => egui::Color32::from_rgb(230, 70, 70),
        1 => egui::Color32::from_rgb(70, 200, 90),
        _ => egui::Color32::from_rgb(80, 120, 240),
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.now();
        let result = self.fader.tick(now, &mut self.driver).map(|_| ());
        self.report(result);

        if self.fader.is_transitioning() {
            ctx.request_repaint();
        }

        let pairs = self.pairs();
        let load = load_profile(&pairs);
        let aligned = aligned_profile(&pairs);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <GroupControls>
                ui.vertical(|ui| {
                    for index in 0..DEFAULT_GROUPS {
                        ui.horizontal(|ui| {
                            ui.label(format!("Group {index}:"));
                            let old_color = self.colors[index];
                            if ui.color_edit_button_srgb(&mut self.colors[index]).changed()
                                && old_color != self.colors[index]
                            {
                                let [r, g, b] = self.colors[index];
                                let result = self.fader.fade_group(
                                    index,
                                    (r, g, b),
                                    Duration::from_millis(0),
                                    now,
                                );
                                self.report(result);
                                ui.ctx().request_repaint();
                            }
                        });
                    }
                });
                // </GroupControls>
                ui.add_space(24.0);
                // <GlobalControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("All groups:");
                        ui.color_edit_button_srgb(&mut self.all_color);
                        if ui.button("Fade all").clicked() {
                            self.fade_all();
                            ui.ctx().request_repaint();
                        }
                        if ui.button("Blink all").clicked() {
                            self.blink_all();
                            ui.ctx().request_repaint();
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Phases:");
                        let mut strategy = self.strategy;
                        ui.selectable_value(&mut strategy, PhaseStrategy::Even, "even");
                        ui.selectable_value(
                            &mut strategy,
                            PhaseStrategy::PerChannel,
                            "per channel",
                        );
                        if strategy != self.strategy {
                            self.change_strategy(strategy);
                            ui.ctx().request_repaint();
                        }
                    });

                    ui.add_space(4.0);

                    let peak = load.iter().copied().max().unwrap_or(0);
                    let aligned_peak = aligned.iter().copied().max().unwrap_or(0);
                    ui.label(format!(
                        "Peak channels on: {peak} (unstaggered: {aligned_peak})"
                    ));

                    if let Some(status) = &self.status {
                        ui.colored_label(egui::Color32::LIGHT_RED, status.as_str());
                    }
                });
                // </GlobalControls>
            });

            ui.add_space(16.0);

            // === Channel waveforms ===
            let width = ui.available_width();
            let scale = width / f32::from(PWM_PERIOD);
            let height = f32::from(CHANNEL_COUNT) * (ROW_HEIGHT + ROW_GAP);
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
            let origin = response.rect.min;

            for (channel, pair) in (0..CHANNEL_COUNT).zip(pairs.iter()) {
                let y = origin.y + f32::from(channel) * (ROW_HEIGHT + ROW_GAP);
                let row = egui::Rect::from_min_size(
                    egui::pos2(origin.x, y),
                    egui::vec2(width, ROW_HEIGHT),
                );
                painter.rect_filled(row, 2.0, egui::Color32::from_gray(30));

                let mut spans = Vec::with_capacity(2);
                if pair.on <= pair.off {
                    spans.push((pair.on, pair.off));
                } else {
                    spans.push((pair.on, PWM_PERIOD));
                    spans.push((0, pair.off));
                }
                for (start, end) in spans {
                    if start == end {
                        continue;
                    }
                    let rect = egui::Rect::from_min_max(
                        egui::pos2(origin.x + f32::from(start) * scale, y),
                        egui::pos2(origin.x + f32::from(end) * scale, y + ROW_HEIGHT),
                    );
                    painter.rect_filled(rect, 2.0, channel_color(channel));
                }
            }

            ui.add_space(16.0);

            // === Load chart ===
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, LOAD_HEIGHT), egui::Sense::hover());
            let rect = response.rect;
            painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));
            let unit = LOAD_HEIGHT / f32::from(CHANNEL_COUNT);

            for (profile, color) in [(&aligned, GREY), (&load, egui::Color32::YELLOW)] {
                let points: Vec<egui::Pos2> = profile
                    .iter()
                    .zip(0u16..)
                    .map(|(&count, tick)| {
                        egui::pos2(
                            rect.min.x + f32::from(tick) * scale,
                            rect.max.y - f32::from(count) * unit,
                        )
                    })
                    .collect();
                painter.add(egui::Shape::line(points, egui::Stroke::new(1.0, color)));
            }
        });
    }
}
