use clap::Parser;
use eframe::egui;
use log::{error, info};

use split_view::config::Config;
use split_view::split::SplitState;
use split_view::theme::Theme;
use split_view::SplitView;

/// Two resizable panes side by side.
#[derive(Parser, Debug)]
#[command(name = "split-view", version, about)]
struct Args {
    /// Initial split ratio, -1 (left collapsed) to 1 (right collapsed)
    #[arg(long, allow_hyphen_values = true)]
    ratio: Option<f32>,

    /// Divider thickness in device-independent units
    #[arg(long)]
    bar: Option<f32>,

    /// light or dark
    #[arg(long)]
    theme: Option<Theme>,

    /// Write an example config to ~/.config/split-view/config.yaml and exit
    #[arg(long)]
    write_example_config: bool,
}

struct SplitViewApp {
    split: SplitState,
    initial_ratio: f32,
    theme: Theme,
    notes: String,
}

impl SplitViewApp {
    fn new(config: Config) -> Self {
        Self {
            split: config.split.to_state("main_split", config.theme),
            initial_ratio: config.split.ratio,
            theme: config.theme,
            notes: String::from("Drag the bar in the middle to resize the panes."),
        }
    }
}

impl eframe::App for SplitViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(format!("Theme: {}", self.theme.name())).clicked() {
                    self.theme.cycle();
                    self.theme.apply(ctx);
                    self.split.bar_color = self.theme.bar_color();
                    info!("Switched to {} theme", self.theme.name());
                }
                if ui.button("Reset").clicked() {
                    self.split.ratio = self.initial_ratio;
                }
                ui.separator();
                ui.label(format!("ratio {:+.3}", self.split.ratio));
                if let Some(pointer) = self.split.drag_pointer() {
                    ui.label(format!("dragging with pointer {}", pointer.0));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let notes = &mut self.notes;
            SplitView::new(&mut self.split).show(
                ui,
                |ui| {
                    ui.heading("Left");
                    ui.add(egui::TextEdit::multiline(notes).desired_width(f32::INFINITY));
                },
                |ui| {
                    ui.heading("Right");
                    egui::ScrollArea::vertical()
                        .id_source("right_scroll")
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            for i in 0..100 {
                                ui.label(format!("Line {}", i));
                            }
                        });
                },
            );
        });
    }
}

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    if args.write_example_config {
        if let Err(e) = Config::create_example() {
            error!("Could not write example config: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut config = Config::load();
    if let Some(ratio) = args.ratio {
        config.split.ratio = ratio;
    }
    if let Some(bar) = args.bar {
        config.split.bar_dp = bar;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }

    info!("split-view starting with ratio {}", config.split.ratio);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window)
            .with_title("Split View"),
        ..Default::default()
    };

    eframe::run_native(
        "split-view",
        native_options,
        Box::new(move |cc| {
            config.theme.apply(&cc.egui_ctx);
            Ok(Box::new(SplitViewApp::new(config)))
        }),
    )
}
