pub mod backend;
pub mod command;
pub mod engine;
pub mod output;
pub mod params;
pub mod session;

pub use backend::{Backend, OUTPUT_INTERFACE};
pub use command::{Command, CommandError};
pub use engine::{tile, LayoutDemand, ViewGeometry, LAYOUT_SYMBOL};
pub use output::{OutputContext, OutputId};
pub use params::{Adjustment, Magnitude, ParamKey, Parameters, Value, ValueKind, WireValue};
pub use session::{Config, Session, SessionError, DEFAULT_NAMESPACE};
