use tatami::{Backend, LayoutDemand, OutputId, ParamKey, Session, Value, ViewGeometry, WireValue};
use wayland_client::protocol::wl_callback::{self, WlCallback};
use wayland_client::protocol::wl_output::WlOutput;
use wayland_client::protocol::wl_registry::{self, WlRegistry};
use wayland_client::{delegate_noop, Connection, Dispatch, Proxy, QueueHandle};

use crate::protocol::{
    river_layout_v1, river_option_handle_v2, RiverLayoutManagerV1, RiverLayoutV1,
    RiverOptionHandleV2, RiverOptionsManagerV2,
};

const OUTPUT_VERSION: u32 = 4;

pub struct RiverBackend {
    qh: QueueHandle<App>,
    registry: WlRegistry,
    layout_manager: Option<RiverLayoutManagerV1>,
    options_manager: Option<RiverOptionsManagerV2>,
}

impl RiverBackend {
    pub fn new(qh: QueueHandle<App>, registry: WlRegistry) -> Self {
        Self {
            qh,
            registry,
            layout_manager: None,
            options_manager: None,
        }
    }
}

/// Maps an option handle event to the value it carries.
fn wire_value(event: river_option_handle_v2::Event) -> Option<WireValue> {
    match event {
        river_option_handle_v2::Event::IntValue { value } => Some(WireValue::Int(value)),
        river_option_handle_v2::Event::UintValue { value } => Some(WireValue::Uint(value)),
        river_option_handle_v2::Event::FixedValue { value } => Some(WireValue::Fixed(value)),
        river_option_handle_v2::Event::StringValue { value } => Some(WireValue::String(value)),
        _ => None,
    }
}

impl Backend for RiverBackend {
    type Output = WlOutput;
    type Layout = RiverLayoutV1;
    type Options = Vec<RiverOptionHandleV2>;

    const LAYOUT_MANAGER: &'static str = "river_layout_manager_v1";
    const OPTIONS_MANAGER: Option<&'static str> = Some("river_options_manager_v2");

    fn bind_layout_manager(&mut self, name: u32, _version: u32) {
        self.layout_manager = Some(self.registry.bind(name, 1, &self.qh, ()));
    }

    fn bind_options_manager(&mut self, name: u32, _version: u32) {
        self.options_manager = Some(self.registry.bind(name, 1, &self.qh, ()));
    }

    fn bind_output(&mut self, name: u32, version: u32) -> WlOutput {
        self.registry
            .bind(name, version.min(OUTPUT_VERSION), &self.qh, ())
    }

    fn has_layout_manager(&self) -> bool {
        self.layout_manager.is_some()
    }

    fn has_options_manager(&self) -> bool {
        self.options_manager.is_some()
    }

    fn get_layout(
        &mut self,
        output: &WlOutput,
        id: OutputId,
        namespace: &str,
    ) -> Option<RiverLayoutV1> {
        let manager = self.layout_manager.as_ref()?;
        Some(manager.get_layout(output, namespace.to_string(), &self.qh, id))
    }

    fn get_options(&mut self, output: &WlOutput, id: OutputId) -> Option<Vec<RiverOptionHandleV2>> {
        let manager = self.options_manager.as_ref()?;
        let handles = ParamKey::ALL
            .into_iter()
            .map(|key| {
                manager.get_option_handle(
                    key.option_name().to_string(),
                    Some(output),
                    &self.qh,
                    (id, key),
                )
            })
            .collect();
        Some(handles)
    }

    fn declare_option(&mut self, key: ParamKey, default: Value) {
        let Some(manager) = &self.options_manager else {
            return;
        };
        let name = key.option_name().to_string();
        match default {
            Value::Uint(value) => manager.declare_uint_option(name, value),
            Value::Fixed(value) => manager.declare_fixed_option(name, value),
        }
    }

    fn push_view_dimensions(&mut self, layout: &RiverLayoutV1, serial: u32, view: &ViewGeometry) {
        layout.push_view_dimensions(
            serial,
            view.x,
            view.y,
            view.width as u32,
            view.height as u32,
        );
    }

    fn commit(&mut self, layout: &RiverLayoutV1, serial: u32, _status: &str) {
        layout.commit(serial);
    }

    fn parameters_changed(&mut self, layout: &RiverLayoutV1) {
        layout.parameters_changed();
    }

    fn destroy_layout(&mut self, layout: RiverLayoutV1) {
        layout.destroy();
    }

    fn destroy_options(&mut self, options: Vec<RiverOptionHandleV2>) {
        for handle in options {
            handle.destroy();
        }
    }

    fn release_output(&mut self, output: WlOutput) {
        if output.version() >= 3 {
            output.release();
        }
    }

    fn destroy_managers(&mut self) {
        if let Some(manager) = self.layout_manager.take() {
            manager.destroy();
        }
        if let Some(manager) = self.options_manager.take() {
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

impl Dispatch<RiverLayoutV1, OutputId> for App {
    fn event(
        state: &mut Self,
        _: &RiverLayoutV1,
        event: river_layout_v1::Event,
        id: &OutputId,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            river_layout_v1::Event::NamespaceInUse => state.session.namespace_in_use(*id),
            river_layout_v1::Event::LayoutDemand {
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
            // advertise_view and advertise_done only matter to content aware layouts
            _ => {}
        }
    }
}

impl Dispatch<RiverOptionHandleV2, (OutputId, ParamKey)> for App {
    fn event(
        state: &mut Self,
        _: &RiverOptionHandleV2,
        event: river_option_handle_v2::Event,
        (id, key): &(OutputId, ParamKey),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        // Every option is declared at startup, so undeclared can be ignored.
        if let Some(value) = wire_value(event) {
            state.session.option_value(*id, *key, value);
        }
    }
}

delegate_noop!(App: ignore WlOutput);
delegate_noop!(App: RiverLayoutManagerV1);
delegate_noop!(App: RiverOptionsManagerV2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_interfaces_match_bindings() {
        assert_eq!(
            RiverBackend::LAYOUT_MANAGER,
            RiverLayoutManagerV1::interface().name
        );
        assert_eq!(
            RiverBackend::OPTIONS_MANAGER,
            Some(RiverOptionsManagerV2::interface().name)
        );
    }

    #[test]
    fn test_wire_value() {
        assert_eq!(
            wire_value(river_option_handle_v2::Event::UintValue { value: 3 }),
            Some(WireValue::Uint(3))
        );
        assert_eq!(
            wire_value(river_option_handle_v2::Event::FixedValue { value: 0.5 }),
            Some(WireValue::Fixed(0.5))
        );
        assert_eq!(
            wire_value(river_option_handle_v2::Event::StringValue { value: None }),
            Some(WireValue::String(None))
        );
        assert_eq!(wire_value(river_option_handle_v2::Event::Undeclared), None);
    }
}
