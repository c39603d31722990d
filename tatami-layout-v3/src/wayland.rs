use tatami::{Backend, LayoutDemand, OutputId, ParamKey, Session, Value, ViewGeometry};
use wayland_client::protocol::wl_callback::{self, WlCallback};
use wayland_client::protocol::wl_output::WlOutput;
use wayland_client::protocol::wl_registry::{self, WlRegistry};
use wayland_client::{delegate_noop, Connection, Dispatch, Proxy, QueueHandle};

use crate::protocol::{river_layout_v3, RiverLayoutManagerV3, RiverLayoutV3};

const LAYOUT_MANAGER_VERSION: u32 = 2;
const OUTPUT_VERSION: u32 = 4;

pub struct RiverBackend {
    qh: QueueHandle<App>,
    registry: WlRegistry,
    layout_manager: Option<RiverLayoutManagerV3>,
}

impl RiverBackend {
    pub fn new(qh: QueueHandle<App>, registry: WlRegistry) -> Self {
        Self {
            qh,
            registry,
            layout_manager: None,
        }
    }
}

/// Sizes go out as computed; a negative size wraps like any other `uint`.
fn wire_dimensions(view: &ViewGeometry) -> (i32, i32, u32, u32) {
    (view.x, view.y, view.width as u32, view.height as u32)
}

impl Backend for RiverBackend {
    type Output = WlOutput;
    type Layout = RiverLayoutV3;
    type Options = ();

    const LAYOUT_MANAGER: &'static str = "river_layout_manager_v3";
    const OPTIONS_MANAGER: Option<&'static str> = None;

    fn bind_layout_manager(&mut self, name: u32, version: u32) {
        let version = version.min(LAYOUT_MANAGER_VERSION);
        self.layout_manager = Some(self.registry.bind(name, version, &self.qh, ()));
    }

    fn bind_options_manager(&mut self, _name: u32, _version: u32) {}

    fn bind_output(&mut self, name: u32, version: u32) -> WlOutput {
        self.registry
            .bind(name, version.min(OUTPUT_VERSION), &self.qh, ())
    }

    fn has_layout_manager(&self) -> bool {
        self.layout_manager.is_some()
    }

    fn has_options_manager(&self) -> bool {
        false
    }

    fn get_layout(
        &mut self,
        output: &WlOutput,
        id: OutputId,
        namespace: &str,
    ) -> Option<RiverLayoutV3> {
        let manager = self.layout_manager.as_ref()?;
        Some(manager.get_layout(output, namespace.to_string(), &self.qh, id))
    }

    fn get_options(&mut self, _output: &WlOutput, _id: OutputId) -> Option<()> {
        None
    }

    fn declare_option(&mut self, _key: ParamKey, _default: Value) {}

    fn push_view_dimensions(&mut self, layout: &RiverLayoutV3, serial: u32, view: &ViewGeometry) {
        let (x, y, width, height) = wire_dimensions(view);
        layout.push_view_dimensions(x, y, width, height, serial);
    }

    fn commit(&mut self, layout: &RiverLayoutV3, serial: u32, status: &str) {
        layout.commit(status.to_string(), serial);
    }

    fn parameters_changed(&mut self, _layout: &RiverLayoutV3) {}

    fn destroy_layout(&mut self, layout: RiverLayoutV3) {
        layout.destroy();
    }

    fn destroy_options(&mut self, _options: ()) {}

    fn release_output(&mut self, output: WlOutput) {
        if output.version() >= 3 {
            output.release();
        }
    }

    fn destroy_managers(&mut self) {
        if let Some(manager) = self.layout_manager.take() {
            manager.destroy();
        }
    }
}

pub struct App {
    pub session: Session<RiverBackend>,
}

impl Dispatch<WlRegistry, ()> for App {
    fn event(
        state: &mut Self,
        _: &WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => state.session.global(name, &interface, version),
            wl_registry::Event::GlobalRemove { name } => state.session.global_remove(name),
            _ => {}
        }
    }
}

impl Dispatch<WlCallback, ()> for App {
    fn event(
        state: &mut Self,
        _: &WlCallback,
        event: wl_callback::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let wl_callback::Event::Done { .. } = event {
            state.session.sync_done();
        }
    }
}

impl Dispatch<RiverLayoutV3, OutputId> for App {
    fn event(
        state: &mut Self,
        _: &RiverLayoutV3,
        event: river_layout_v3::Event,
        id: &OutputId,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            river_layout_v3::Event::NamespaceInUse => state.session.namespace_in_use(*id),
            river_layout_v3::Event::LayoutDemand {
                view_count,
                usable_width,
                usable_height,
                tags,
                serial,
            } => state.session.layout_demand(
                *id,
                LayoutDemand {
                    view_count,
                    width: usable_width,
                    height: usable_height,
                    tags,
                    serial,
                },
            ),
            river_layout_v3::Event::UserCommand { command } => {
                state.session.user_command(*id, &command)
            }
            river_layout_v3::Event::UserCommandTags { tags } => {
                tracing::trace!("User command on {} for tags {:#x}", id, tags);
            }
        }
    }
}

delegate_noop!(App: ignore WlOutput);
delegate_noop!(App: RiverLayoutManagerV3);
