// Learning sessions: meeting links are withheld until the scheduled start.

pub mod handlers;
pub mod link_gate;
