//! Side-effect dispatch to host collaborators.

use tracing::trace;

use crate::host::HostContext;

use super::effect::SideEffect;

/// Dispatches side-effect requests to the host.
pub struct SideEffectResolver;

impl SideEffectResolver {
    /// Dispatch every request in order. Returns how many were sent.
    pub fn apply<'e>(ctx: &HostContext<'_>, effects: impl IntoIterator<Item = &'e SideEffect>) -> usize {
        let mut sent = 0;
        for effect in effects {
            Self::apply_one(ctx, effect);
            sent += 1;
        }
        sent
    }

    /// Dispatch a single request.
    pub fn apply_one(ctx: &HostContext<'_>, effect: &SideEffect) {
        match effect {
            SideEffect::DropItem(request) => {
                trace!(item = %request.item, owner = %request.owner, "requesting drop");
                ctx.inventory.request_drop(*request);
            }
            SideEffect::RemoveItem(request) => {
                trace!(item = %request.item, owner = %request.owner, "requesting removal");
                ctx.inventory.remove_item(*request);
            }
            SideEffect::SetBlock { position, block } => {
                trace!(%position, %block, "placing block");
                ctx.world.set_block(*position, block);
            }
        }
    }
}
