//! Desktop preview app for status-led-vm animations
//!
//! Plays the built-in animations on a simulated LED bank and color LED.
//! Animation changes go through the control queue, like button presses on the
//! device.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use status_led_vm::content::BUILTIN;
use status_led_vm::frame_scheduler::FrameScheduler;
use status_led_vm::{
    BANK_LEDS, BrightnessStore, COLOR_CHANNELS, Control, ControlQueue, ControlSender, Engine,
    EngineConfig, Instant, MAX_LEVEL, OutputDriver, RamSelection,
};

/// Size of each bank LED in pixels
const LED_SIZE: f32 = 28.0;

/// Gap between LEDs
const LED_GAP: f32 = 6.0;

/// Control queue size
const CONTROL_QUEUE_SIZE: usize = 8;

static CONTROLS: ControlQueue<CONTROL_QUEUE_SIZE> = ControlQueue::new();
static BRIGHTNESS: BrightnessStore = BrightnessStore::new();

/// Keeps the last frame so the UI can paint it
#[derive(Default)]
struct PreviewOutput {
    bank: [u8; BANK_LEDS],
    color: [u8; COLOR_CHANNELS],
}

impl OutputDriver for PreviewOutput {
    fn write(&mut self, bank: &[u8; BANK_LEDS], color: &[u8; COLOR_CHANNELS]) {
        self.bank = *bank;
        self.color = *color;
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 360.0])
            .with_title("Status LED Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "status-led-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    scheduler: FrameScheduler<'static, PreviewOutput, RamSelection, CONTROL_QUEUE_SIZE>,
    controls: ControlSender<'static, CONTROL_QUEUE_SIZE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Index of the first LED of the right arc
    split_point: usize,
}

impl PreviewApp {
    fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            scheduler: Self::scheduler(&config, 0),
            controls: CONTROLS.sender(),
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            split_point: config.split_point,
        }
    }

    fn scheduler(
        config: &EngineConfig,
        selected: u8,
    ) -> FrameScheduler<'static, PreviewOutput, RamSelection, CONTROL_QUEUE_SIZE> {
        let mut engine = match Engine::new(BUILTIN, &BRIGHTNESS, RamSelection::new(selected), config)
        {
            Ok(engine) => engine,
            Err(err) => panic!("{err}"),
        };
        engine.initialize(0);
        FrameScheduler::new(engine, PreviewOutput::default(), CONTROLS.receiver())
    }

    /// Rebuild the engine, restarting time from zero
    fn restart(&mut self) {
        let selected = self.scheduler.engine().selected_index();
        let config = EngineConfig {
            split_point: self.split_point,
        };
        self.scheduler = Self::scheduler(&config, selected);
        self.t_ms = 0;
        self.last_frame = StdInstant::now();
    }

    fn send(&self, control: Control) {
        let _ = self.controls.try_send(control);
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = if delta_ms.is_finite() {
                delta_ms.max(0.0) as u64
            } else {
                0
            };
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }
}

/// Map a 4-bit level to an 8-bit intensity
fn intensity(level: u8) -> u8 {
    let level = u16::from(level.min(MAX_LEVEL));
    #[allow(clippy::cast_possible_truncation)]
    let value = (level * 255 / u16::from(MAX_LEVEL)) as u8;
    value
}

/// Color LED channels are red, green and two blue emitters
fn mix(color: &[u8; COLOR_CHANNELS]) -> egui::Color32 {
    let blue = (u16::from(color[2]) + u16::from(color[3])).min(u16::from(MAX_LEVEL));
    #[allow(clippy::cast_possible_truncation)]
    let blue = blue as u8;
    egui::Color32::from_rgb(intensity(color[0]), intensity(color[1]), intensity(blue))
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.scheduler.tick(Instant::from_millis(self.t_ms));

        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⏮ Reset").clicked() {
                    self.restart();
                }
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.playing = !self.playing;
                }
                let secs = self.t_ms / 1000;
                let ms = self.t_ms % 1000;
                ui.label(format!("Time: {secs}.{ms:03}s"));
            });

            ui.horizontal(|ui| {
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
            });

            ui.horizontal(|ui| {
                ui.label("Split:");
                let old_split = self.split_point;
                ui.add(egui::Slider::new(&mut self.split_point, 1..=BANK_LEDS - 1));
                if self.split_point != old_split {
                    self.restart();
                }
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Animation:");
                let engine = self.scheduler.engine();
                let current = engine.selected_index();
                let mut selected = current;
                egui::ComboBox::from_id_salt("animation_selector")
                    .selected_text(engine.current().name())
                    .show_ui(ui, |ui| {
                        for (index, animation) in (0u8..).zip(BUILTIN.iter()) {
                            ui.selectable_value(&mut selected, index, animation.name());
                        }
                    });
                if selected != current {
                    self.send(Control::Select(selected));
                }
                if ui.button("Next").clicked() {
                    self.send(Control::Next);
                }
            });

            ui.add_space(16.0);

            let output = self.scheduler.output();
            let led_pitch = LED_SIZE + LED_GAP;
            let split = self.split_point;

            // Left arc on the top row, right arc underneath
            let (response, painter) = ui.allocate_painter(
                egui::vec2(ui.available_width(), led_pitch * 3.0),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, level) in output.bank.iter().enumerate() {
                let (col, row) = if i < split { (i, 0) } else { (i - split, 1) };
                let center = egui::pos2(
                    origin.x + col as f32 * led_pitch + LED_SIZE / 2.0,
                    origin.y + row as f32 * led_pitch + LED_SIZE / 2.0,
                );
                let value = intensity(*level);
                painter.circle_filled(
                    center,
                    LED_SIZE / 2.0,
                    egui::Color32::from_rgb(value, value / 2, 0),
                );
            }

            let center = egui::pos2(
                origin.x + led_pitch * 9.0,
                origin.y + led_pitch,
            );
            painter.circle_filled(center, LED_SIZE, mix(&output.color));

            ui.label(format!(
                "bank {:?}   color {:?}",
                BRIGHTNESS.bank(),
                BRIGHTNESS.color()
            ));
        });
    }
}
