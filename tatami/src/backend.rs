use crate::engine::ViewGeometry;
use crate::output::OutputId;
use crate::params::{ParamKey, Value};

pub const OUTPUT_INTERFACE: &str = "wl_output";

/// Requests a layout generator sends to the compositor.
///
/// Each protocol generation implements this once over its generated
/// bindings. Handles are owned by the session and handed back on release.
pub trait Backend {
    type Output;
    type Layout;
    /// Per-output option handles. `()` for generations without river-options.
    type Options;

    const LAYOUT_MANAGER: &'static str;
    const OPTIONS_MANAGER: Option<&'static str>;

    fn bind_layout_manager(&mut self, name: u32, version: u32);
    fn bind_options_manager(&mut self, name: u32, version: u32);
    fn bind_output(&mut self, name: u32, version: u32) -> Self::Output;

    fn has_layout_manager(&self) -> bool;
    fn has_options_manager(&self) -> bool;

    /// `None` when no layout manager is bound.
    fn get_layout(
        &mut self,
        output: &Self::Output,
        id: OutputId,
        namespace: &str,
    ) -> Option<Self::Layout>;
    fn get_options(&mut self, output: &Self::Output, id: OutputId) -> Option<Self::Options>;
    fn declare_option(&mut self, key: ParamKey, default: Value);

    fn push_view_dimensions(&mut self, layout: &Self::Layout, serial: u32, view: &ViewGeometry);
    /// `status` is only transmitted by generations whose commit carries one.
    fn commit(&mut self, layout: &Self::Layout, serial: u32, status: &str);
    fn parameters_changed(&mut self, layout: &Self::Layout);

    fn destroy_layout(&mut self, layout: Self::Layout);
    fn destroy_options(&mut self, options: Self::Options);
    fn release_output(&mut self, output: Self::Output);
    fn destroy_managers(&mut self);
}
