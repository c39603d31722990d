use crate::params::{clamp_ratio, Parameters};

/// Symbol reported to the compositor for the tiled layout.
pub const LAYOUT_SYMBOL: &str = "[]=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDemand {
    pub view_count: u32,
    pub width: u32,
    pub height: u32,
    pub tags: u32,
    pub serial: u32,
}

/// Placement of one view, relative to the output's usable area.
///
/// Sizes may come out non-positive when the padding exceeds the slot. They
/// are passed through as computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Master-stack layout: up to `main_count` views share the main column,
/// the rest share the stack column.
pub fn tile(demand: &LayoutDemand, params: &Parameters) -> Vec<ViewGeometry> {
    let view_count = i64::from(demand.view_count);
    let main_count = i64::from(params.main_count);
    let view_padding = i64::from(params.view_padding);
    let outer_padding = i64::from(params.outer_padding);

    let width = i64::from(demand.width) - 2 * outer_padding;
    let height = i64::from(demand.height) - 2 * outer_padding;

    let (main_width, stack_width) = if main_count == 0 {
        (0, width)
    } else if view_count <= main_count {
        (width, 0)
    } else {
        let main_width = (width as f64 * clamp_ratio(params.main_ratio)).floor() as i64;
        (main_width, width - main_width)
    };

    (0..view_count)
        .map(|i| {
            let (x, y, w, h) = if i < main_count {
                let h = height / main_count.min(view_count);
                (0, i * h, main_width, h)
            } else {
                let h = height / (view_count - main_count);
                (main_width, (i - main_count) * h, stack_width, h)
            };

            ViewGeometry {
                x: (x + view_padding + outer_padding) as i32,
                y: (y + view_padding + outer_padding) as i32,
                width: (w - 2 * view_padding) as i32,
                height: (h - 2 * view_padding) as i32,
            }
        })
        .collect()
}

/// Status line committed alongside a layout, e.g. `[]= 1/4`.
pub fn status(params: &Parameters, view_count: u32) -> String {
    format!("{} {}/{}", LAYOUT_SYMBOL, params.main_count, view_count)
}
