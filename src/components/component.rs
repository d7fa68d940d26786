//! The closed component set.
//!
//! Hosts usually look components up by runtime type token. Here the set of
//! components the rules read or write is fixed at compile time: every
//! component is a variant of [`Component`], tagged by [`ComponentKind`],
//! and has a typed struct implementing [`ComponentData`] so callers never
//! match on the enum by hand.

use serde::{Deserialize, Serialize};

use crate::core::{BlockUri, EntityId, MarkerKind, TeamId, Vec3};

/// Tag identifying a component variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// [`TeamTag`]
    Team,
    /// [`PlayerCharacter`]
    PlayerCharacter,
    /// [`HeldItem`]
    HeldItem,
    /// [`Location`]
    Location,
    /// [`FlagCarryState`]
    FlagCarry,
    /// [`VisualMarker`]
    VisualMarker,
    /// [`AuthorizedWeapon`]
    AuthorizedWeapon,
    /// [`BlockItem`]
    BlockItem,
}

/// Team membership of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTag {
    pub team: TeamId,
}

/// Marks an entity as a player character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCharacter;

/// Item currently selected in a character's hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    pub item: EntityId,
}

/// World position of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub position: Vec3,
}

/// Which team's flag a player carries.
///
/// Written only by the flag state engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCarryState {
    pub team: TeamId,
}

/// Cosmetic marker on a flag carrier.
///
/// Attached and removed in lockstep with [`FlagCarryState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualMarker {
    pub marker: MarkerKind,
}

/// Marks an item as a weapon whose hits knock flags loose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedWeapon;

/// Marks an item as a placeable block of the given family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockItem {
    pub block: BlockUri,
}

/// A component value of any kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Team(TeamTag),
    PlayerCharacter(PlayerCharacter),
    HeldItem(HeldItem),
    Location(Location),
    FlagCarry(FlagCarryState),
    VisualMarker(VisualMarker),
    AuthorizedWeapon(AuthorizedWeapon),
    BlockItem(BlockItem),
}

impl Component {
    /// The tag of this component.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Team(_) => ComponentKind::Team,
            Component::PlayerCharacter(_) => ComponentKind::PlayerCharacter,
            Component::HeldItem(_) => ComponentKind::HeldItem,
            Component::Location(_) => ComponentKind::Location,
            Component::FlagCarry(_) => ComponentKind::FlagCarry,
            Component::VisualMarker(_) => ComponentKind::VisualMarker,
            Component::AuthorizedWeapon(_) => ComponentKind::AuthorizedWeapon,
            Component::BlockItem(_) => ComponentKind::BlockItem,
        }
    }
}

/// Typed view of one [`Component`] variant.
///
/// ```
/// use rust_ctf::components::{Component, ComponentData, ComponentKind, TeamTag};
/// use rust_ctf::core::TeamId;
///
/// let tag = TeamTag { team: TeamId::new(1) };
/// let component: Component = tag.into();
///
/// assert_eq!(TeamTag::KIND, ComponentKind::Team);
/// assert_eq!(TeamTag::from_component(component), Some(tag));
/// ```
pub trait ComponentData: Clone + Into<Component> {
    /// Tag of the variant this type wraps.
    const KIND: ComponentKind;

    /// Unwrap the variant, or `None` if the component is of another kind.
    fn from_component(component: Component) -> Option<Self>;
}

macro_rules! component_data {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Component::$variant(value)
                }
            }

            impl ComponentData for $ty {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn from_component(component: Component) -> Option<Self> {
                    match component {
                        Component::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

component_data! {
    TeamTag => Team,
    PlayerCharacter => PlayerCharacter,
    HeldItem => HeldItem,
    Location => Location,
    FlagCarryState => FlagCarry,
    VisualMarker => VisualMarker,
    AuthorizedWeapon => AuthorizedWeapon,
    BlockItem => BlockItem,
}

impl TeamTag {
    /// Tag a player as a member of `team`.
    #[must_use]
    pub const fn new(team: TeamId) -> Self {
        Self { team }
    }
}

impl HeldItem {
    /// Hold `item`.
    #[must_use]
    pub const fn new(item: EntityId) -> Self {
        Self { item }
    }
}

impl Location {
    /// Place an entity at `position`.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self { position }
    }
}

impl FlagCarryState {
    /// Carry `team`'s flag.
    #[must_use]
    pub const fn new(team: TeamId) -> Self {
        Self { team }
    }
}

impl VisualMarker {
    /// Show `marker`.
    #[must_use]
    pub const fn new(marker: MarkerKind) -> Self {
        Self { marker }
    }
}

impl BlockItem {
    /// Item form of `block`.
    pub fn new(block: impl Into<BlockUri>) -> Self {
        Self { block: block.into() }
    }
}
