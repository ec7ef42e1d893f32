//! Chart Viewer
//! Each chart lives in its own floating window; any number can stay open.

use crate::charts::{ChartPlotter, ChartSpec};

const WINDOW_SIZE: [f32; 2] = [560.0, 380.0];
const CASCADE_OFFSET: f32 = 30.0;

/// An open chart window
struct ChartWindow {
    id: String,
    spec: ChartSpec,
    open: bool,
    offset: usize,
}

/// Non-blocking chart windows opened by the visualizer.
#[derive(Default)]
pub struct ChartViewer {
    windows: Vec<ChartWindow>,
    next_id: u64,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open one window per chart; earlier windows stay open.
    pub fn open_charts(&mut self, charts: Vec<ChartSpec>) {
        for (offset, spec) in charts.into_iter().enumerate() {
            self.next_id += 1;
            self.windows.push(ChartWindow {
                id: format!("chart_{}", self.next_id),
                spec,
                open: true,
                offset,
            });
        }
    }

    pub fn open_count(&self) -> usize {
        self.windows.iter().filter(|w| w.open).count()
    }

    /// Close all chart windows
    pub fn clear(&mut self) {
        self.windows.clear();
    }

    /// Draw every open window and forget the ones the user closed.
    pub fn show(&mut self, ctx: &egui::Context) {
        for window in &mut self.windows {
            let pos = egui::pos2(
                360.0 + window.offset as f32 * CASCADE_OFFSET,
                60.0 + window.offset as f32 * CASCADE_OFFSET,
            );

            egui::Window::new(&window.spec.title)
                .id(egui::Id::new(&window.id))
                .open(&mut window.open)
                .default_pos(pos)
                .default_size(WINDOW_SIZE)
                .resizable(true)
                .show(ctx, |ui| {
                    ChartPlotter::draw_chart(ui, &window.id, &window.spec);
                });
        }

        self.windows.retain(|w| w.open);
    }
}
