//! Wire messages for the engine's gRPC surface.
//!
//! Written directly against `prost`, in the shape `tonic-build` emits, so
//! the crate builds without a system protobuf compiler. Field tags are the
//! engine's published contract and must not be reordered.

/// World-space point.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Vector3 {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
    #[prost(float, tag = "3")]
    pub z: f32,
}

/// Spawn request for one agent.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AgentSpawn {
    #[prost(uint32, tag = "1")]
    pub agent_id: u32,
    /// Engine picks the location when set; `position` is ignored.
    #[prost(bool, tag = "2")]
    pub random: bool,
    #[prost(message, optional, tag = "3")]
    pub position: ::core::option::Option<Vector3>,
}

/// Supply placement rules for the session.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SupplyRulesMsg {
    #[prost(float, tag = "1")]
    pub heatmap_center_x: f32,
    #[prost(float, tag = "2")]
    pub heatmap_center_z: f32,
    #[prost(float, tag = "3")]
    pub heatmap_radius: f32,
    #[prost(uint32, tag = "4")]
    pub indoor_richness: u32,
    #[prost(uint32, tag = "5")]
    pub outdoor_richness: u32,
    #[prost(uint32, tag = "6")]
    pub indoor_quantity_min: u32,
    #[prost(uint32, tag = "7")]
    pub indoor_quantity_max: u32,
    #[prost(uint32, tag = "8")]
    pub outdoor_quantity_min: u32,
    #[prost(uint32, tag = "9")]
    pub outdoor_quantity_max: u32,
    #[prost(uint32, tag = "10")]
    pub spacing: u32,
}

/// One-shot session handshake.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SessionRequest {
    #[prost(int32, tag = "1")]
    pub game_mode: i32,
    #[prost(uint32, tag = "2")]
    pub map_id: u32,
    #[prost(uint64, tag = "3")]
    pub random_seed: u64,
    /// Episode timeout registered with the engine, seconds.
    #[prost(uint32, tag = "4")]
    pub episode_timeout_s: u32,
    #[prost(message, repeated, tag = "5")]
    pub spawns: ::prost::alloc::vec::Vec<AgentSpawn>,
    /// Registered action dimensions, by wire id, in submission order.
    #[prost(int32, repeated, tag = "6")]
    pub actions: ::prost::alloc::vec::Vec<i32>,
    #[prost(bool, tag = "7")]
    pub depth_map: bool,
    #[prost(bool, tag = "8")]
    pub record: bool,
    #[prost(message, optional, tag = "9")]
    pub supply: ::core::option::Option<SupplyRulesMsg>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SessionReply {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReplayLabelRequest {
    #[prost(string, tag = "1")]
    pub label: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReplayLabelReply {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EpisodeRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EpisodeReply {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FinishedRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FinishedReply {
    #[prost(bool, tag = "1")]
    pub finished: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimeStepRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimeStepReply {
    #[prost(uint32, tag = "1")]
    pub time_step: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateRequest {}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SupplyMsg {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(message, optional, tag = "2")]
    pub position: ::core::option::Option<Vector3>,
    #[prost(uint32, tag = "3")]
    pub quantity: u32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct EnemyMsg {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(message, optional, tag = "2")]
    pub position: ::core::option::Option<Vector3>,
    #[prost(float, tag = "3")]
    pub health: f32,
}

/// Row-major depth buffer.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DepthMapMsg {
    #[prost(uint32, tag = "1")]
    pub rows: u32,
    #[prost(uint32, tag = "2")]
    pub cols: u32,
    #[prost(float, repeated, tag = "3")]
    pub values: ::prost::alloc::vec::Vec<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AgentStateMsg {
    #[prost(uint32, tag = "1")]
    pub agent_id: u32,
    #[prost(message, optional, tag = "2")]
    pub position: ::core::option::Option<Vector3>,
    #[prost(float, tag = "3")]
    pub pitch: f32,
    #[prost(float, tag = "4")]
    pub yaw: f32,
    #[prost(float, tag = "5")]
    pub health: f32,
    #[prost(uint32, tag = "6")]
    pub weapon_ammo: u32,
    #[prost(uint32, tag = "7")]
    pub spare_ammo: u32,
    #[prost(message, repeated, tag = "8")]
    pub supplies: ::prost::alloc::vec::Vec<SupplyMsg>,
    #[prost(message, repeated, tag = "9")]
    pub enemies: ::prost::alloc::vec::Vec<EnemyMsg>,
    #[prost(message, optional, tag = "10")]
    pub depth_map: ::core::option::Option<DepthMapMsg>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateReply {
    #[prost(message, repeated, tag = "1")]
    pub states: ::prost::alloc::vec::Vec<AgentStateMsg>,
}

/// One agent's encoded action tuple, ordered per the registered dimensions.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AgentActionMsg {
    #[prost(uint32, tag = "1")]
    pub agent_id: u32,
    #[prost(float, repeated, tag = "2")]
    pub values: ::prost::alloc::vec::Vec<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActionRequest {
    #[prost(message, repeated, tag = "1")]
    pub actions: ::prost::alloc::vec::Vec<AgentActionMsg>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActionReply {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CloseRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CloseReply {}
