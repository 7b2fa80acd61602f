use cosmwasm_std::IbcPacket;
use valence_ibc_utils::Acknowledgement;
use valence_keeper_utils::Context;

/// A layer wrapped around the transfer application on receive.
pub trait IbcMiddleware {
    fn name(&self) -> &str;

    /// Called with the acknowledgement produced by the layers beneath. The
    /// returned acknowledgement is handed to the next layer up.
    fn on_recv_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &IbcPacket,
        ack: Acknowledgement,
    ) -> Acknowledgement;
}

/// Receive path of a transfer stack, innermost layer first. The layer order
/// is fixed once built.
pub struct MiddlewareStack {
    layers: Vec<Box<dyn IbcMiddleware>>,
}

impl MiddlewareStack {
    pub fn builder() -> MiddlewareStackBuilder {
        MiddlewareStackBuilder::default()
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    pub fn on_recv_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &IbcPacket,
        ack: Acknowledgement,
    ) -> Acknowledgement {
        self.layers
            .iter()
            .fold(ack, |ack, layer| layer.on_recv_packet(ctx, packet, ack))
    }
}

#[derive(Default)]
pub struct MiddlewareStackBuilder {
    layers: Vec<Box<dyn IbcMiddleware>>,
}

impl MiddlewareStackBuilder {
    pub fn push(mut self, layer: impl IbcMiddleware + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn build(self) -> MiddlewareStack {
        MiddlewareStack {
            layers: self.layers,
        }
    }
}
