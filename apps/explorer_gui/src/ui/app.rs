//! Explorer window: five cascading selectors above the results table.

use std::time::Duration;

use client_core::{
    Disposition, Field, ResultsTable, ResultsView, SelectionController, Slot, SlotStatus,
    NO_DATA_MESSAGE,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_fetches;

const SELECTOR_WIDTH: f32 = 200.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

struct Selector {
    field: Field,
    title: &'static str,
    placeholder: &'static str,
    source: Slot,
}

const SELECTORS: [Selector; 5] = [
    Selector {
        field: Field::Category,
        title: "FOOD CATEGORIES",
        placeholder: "Select Category",
        source: Slot::Categories,
    },
    Selector {
        field: Field::FoodName,
        title: "FOOD NAMES",
        placeholder: "Select Food",
        source: Slot::FoodNames,
    },
    Selector {
        field: Field::Table,
        title: "TABLE SELECTION",
        placeholder: "Select Table",
        source: Slot::Tables,
    },
    Selector {
        field: Field::SubSelection,
        title: "PROXIMATE SUB",
        placeholder: "Select Column",
        source: Slot::Columns,
    },
    Selector {
        field: Field::Column,
        title: "COLUMN",
        placeholder: "Select Column",
        source: Slot::Columns,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct ExplorerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: SelectionController,
    server_url: String,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl ExplorerApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: SelectionController::new(),
            server_url: startup.server_url,
            status: "Loading categories...".to_string(),
            status_banner: None,
        };
        let requests = app.controller.initialize();
        dispatch_fetches(&app.cmd_tx, requests, &mut app.status);
        app
    }

    fn select(&mut self, field: Field, value: String) {
        let requests = self.controller.set_field(field, value);
        dispatch_fetches(&self.cmd_tx, requests, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = err.summary();
                    if err.context() == UiErrorContext::BackendStartup {
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: format!("{} ({})", err.summary(), err.message()),
                        });
                    }
                }
                UiEvent::FetchCompleted(completion) => {
                    let slot = completion.ticket.slot;
                    if self.controller.apply(completion) == Disposition::Stale {
                        continue;
                    }
                    self.status = match self.controller.status(slot) {
                        SlotStatus::Failed(message) => {
                            UiError::from_message(UiErrorContext::Fetch(slot), message.as_str())
                                .summary()
                        }
                        SlotStatus::Empty => format!("No {} returned", slot.label()),
                        _ => format!("Loaded {}", slot.label()),
                    };
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_selector(&mut self, ui: &mut egui::Ui, selector: &Selector) {
        let selection = self.controller.selection();
        let options = self.controller.options();
        let enabled = selector
            .field
            .upstream()
            .is_none_or(|upstream| selection.is_set(upstream));
        let current = selection.get(selector.field).to_string();
        let choices = options.choices(selector.field);
        let selected_text = if current.is_empty() {
            selector.placeholder.to_string()
        } else {
            options
                .label_for(selector.field, &current)
                .unwrap_or_else(|| current.clone())
        };
        let status = self.controller.status(selector.source).clone();
        let mut picked: Option<String> = None;

        egui::Frame::group(ui.style())
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_width(SELECTOR_WIDTH);
                ui.label(egui::RichText::new(selector.title).small().strong());
                ui.add_enabled_ui(enabled, |ui| {
                    egui::ComboBox::from_id_salt(selector.field.label())
                        .selected_text(selected_text)
                        .width(SELECTOR_WIDTH)
                        .show_ui(ui, |ui| {
                            if ui
                                .selectable_label(current.is_empty(), selector.placeholder)
                                .clicked()
                            {
                                picked = Some(String::new());
                            }
                            for (value, label) in &choices {
                                if ui.selectable_label(*value == current, label).clicked() {
                                    picked = Some(value.clone());
                                }
                            }
                        });
                });
                match &status {
                    SlotStatus::Loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.small("Loading...");
                        });
                    }
                    SlotStatus::Failed(message) => {
                        let err = UiError::from_message(
                            UiErrorContext::Fetch(selector.source),
                            message.as_str(),
                        );
                        ui.small(
                            egui::RichText::new(err.category().label())
                                .color(egui::Color32::from_rgb(220, 120, 120)),
                        )
                        .on_hover_text(err.message());
                    }
                    _ => {}
                }
            });

        // Re-picking the shown value is a no-op, as in a native select.
        if let Some(value) = picked.filter(|value| *value != current) {
            self.select(selector.field, value);
        }
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        match self.controller.results_view() {
            ResultsView::NoData => {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(NO_DATA_MESSAGE).color(egui::Color32::GRAY));
                });
            }
            ResultsView::Table(table) => self.show_results_table(ui, &table),
        }
    }

    fn show_results_table(&self, ui: &mut egui::Ui, table: &ResultsTable) {
        let title = self
            .controller
            .options()
            .label_for(Field::Category, &table.title)
            .unwrap_or_else(|| table.title.clone());

        egui::Frame::group(ui.style())
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.heading(title);
                ui.add_space(6.0);
                egui::ScrollArea::both()
                    .id_salt("results_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        egui::Grid::new("results_grid")
                            .striped(true)
                            .min_col_width(80.0)
                            .show(ui, |ui| {
                                for header in &table.headers {
                                    ui.strong(header);
                                }
                                ui.end_row();
                                for row in &table.rows {
                                    for cell in row {
                                        ui.label(cell);
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(&self.server_url);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            ui.horizontal_wrapped(|ui| {
                for selector in &SELECTORS {
                    self.show_selector(ui, selector);
                }
            });
            ui.add_space(16.0);
            self.show_results(ui);
        });

        if self.controller.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
