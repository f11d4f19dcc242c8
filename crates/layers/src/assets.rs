use scene::components::{ModelAsset, TextureHandle};

/// Identifies one load request; responses carrying an older ticket are stale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum AssetKind {
    /// Image shown on a place's sprite panel.
    Image { url: String },
    /// Detail model looked up in the polygon catalog by `lod2` id.
    DetailModel { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetRequest {
    pub ticket: LoadTicket,
    /// Registry slot of the requesting feature.
    pub feature: usize,
    pub kind: AssetKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssetPayload {
    Image(TextureHandle),
    Model(ModelAsset),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetResponse {
    pub ticket: LoadTicket,
    pub payload: AssetPayload,
}

impl AssetResponse {
    pub fn image(ticket: LoadTicket, handle: TextureHandle) -> Self {
        Self {
            ticket,
            payload: AssetPayload::Image(handle),
        }
    }

    pub fn model(ticket: LoadTicket, model: ModelAsset) -> Self {
        Self {
            ticket,
            payload: AssetPayload::Model(model),
        }
    }
}

/// Outgoing load requests, drained by the host once per frame.
#[derive(Debug, Default)]
pub struct AssetQueue {
    next: u64,
    pending: Vec<AssetRequest>,
    issued: Vec<(LoadTicket, usize)>,
}

impl AssetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, feature: usize, kind: AssetKind) -> LoadTicket {
        let ticket = LoadTicket(self.next);
        self.next += 1;
        self.pending.push(AssetRequest { ticket, feature, kind });
        self.issued.push((ticket, feature));
        ticket
    }

    /// Requests queued since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<AssetRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[AssetRequest] {
        &self.pending
    }

    /// Feature slot that issued `ticket`; removes the record.
    pub fn complete(&mut self, ticket: LoadTicket) -> Option<usize> {
        let pos = self.issued.iter().position(|(t, _)| *t == ticket)?;
        Some(self.issued.swap_remove(pos).1)
    }

    /// Forget `ticket` without routing a response, e.g. when the load failed.
    pub fn cancel(&mut self, ticket: LoadTicket) -> bool {
        self.complete(ticket).is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tickets_are_unique_and_routed_to_their_feature() {
        let mut q = AssetQueue::new();
        let a = q.request(3, AssetKind::Image { url: "a.png".into() });
        let b = q.request(5, AssetKind::DetailModel { id: "m".into() });
        assert_ne!(a, b);
        assert_eq!(q.drain().len(), 2);
        assert!(q.pending().is_empty());
        assert_eq!(q.in_flight(), 2);
        assert_eq!(q.complete(b), Some(5));
        assert_eq!(q.complete(b), None);
        assert_eq!(q.complete(a), Some(3));
    }
}
