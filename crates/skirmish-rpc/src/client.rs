//! Thin unary-call client for the engine's gRPC service.

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

use crate::wire;

/// gRPC client for the `skirmish.Engine` service.
#[derive(Debug, Clone)]
pub struct EngineClient {
    inner: tonic::client::Grpc<Channel>,
}

impl EngineClient {
    pub async fn connect(endpoint: Endpoint) -> Result<Self, tonic::transport::Error> {
        let channel = endpoint.connect().await?;
        Ok(Self {
            inner: tonic::client::Grpc::new(channel),
        })
    }

    async fn unary<Req, Resp>(
        &mut self,
        request: Req,
        path: &'static str,
    ) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
    {
        self.inner.ready().await.map_err(|err| {
            tonic::Status::unavailable(format!("engine channel not ready: {err}"))
        })?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(path);
        self.inner
            .unary(tonic::Request::new(request), path, codec)
            .await
            .map(tonic::Response::into_inner)
    }

    pub async fn start_session(
        &mut self,
        request: wire::SessionRequest,
    ) -> Result<wire::SessionReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/StartSession").await
    }

    pub async fn set_replay_label(
        &mut self,
        request: wire::ReplayLabelRequest,
    ) -> Result<wire::ReplayLabelReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/SetReplayLabel").await
    }

    pub async fn new_episode(
        &mut self,
        request: wire::EpisodeRequest,
    ) -> Result<wire::EpisodeReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/NewEpisode").await
    }

    pub async fn episode_finished(
        &mut self,
        request: wire::FinishedRequest,
    ) -> Result<wire::FinishedReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/EpisodeFinished").await
    }

    pub async fn time_step(
        &mut self,
        request: wire::TimeStepRequest,
    ) -> Result<wire::TimeStepReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/TimeStep").await
    }

    pub async fn state_all(
        &mut self,
        request: wire::StateRequest,
    ) -> Result<wire::StateReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/StateAll").await
    }

    pub async fn submit_actions(
        &mut self,
        request: wire::ActionRequest,
    ) -> Result<wire::ActionReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/SubmitActions").await
    }

    pub async fn close(
        &mut self,
        request: wire::CloseRequest,
    ) -> Result<wire::CloseReply, tonic::Status> {
        self.unary(request, "/skirmish.Engine/Close").await
    }
}
