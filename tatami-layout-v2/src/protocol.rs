//! Client bindings for `river-layout-v2`, generated from `protocols/` at compile time.

#![allow(dead_code, non_camel_case_types, unused_unsafe, unused_variables)]
#![allow(non_upper_case_globals, non_snake_case, unused_imports)]
#![allow(missing_docs, clippy::all)]

pub mod river_layout {
    use wayland_client;
    use wayland_client::protocol::*;

    pub mod __interfaces {
        use wayland_client::backend as wayland_backend;
        use wayland_client::protocol::__interfaces::*;
        wayland_scanner::generate_interfaces!("protocols/river-layout-v2.xml");
    }
    use self::__interfaces::*;

    wayland_scanner::generate_client_code!("protocols/river-layout-v2.xml");
}

pub use river_layout::river_layout_manager_v2::RiverLayoutManagerV2;
pub use river_layout::river_layout_v2::{self, RiverLayoutV2};
