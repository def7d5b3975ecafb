use crate::{Comment, STUB_UUID};

use uuid::Uuid;

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    arbitrary::Arbitrary,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct UserId(#[generator(bolero::gen_arbitrary())] pub Uuid);

impl UserId {
    pub fn stub() -> UserId {
        UserId(STUB_UUID)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    arbitrary::Arbitrary,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl Role {
    /// Admins and instructors curate discussions, eg. by marking solutions
    pub fn can_moderate(&self) -> bool {
        match self {
            Role::Admin | Role::Instructor => true,
            Role::Student => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Instructor => "Instructor",
            Role::Student => "Student",
        }
    }
}

#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    arbitrary::Arbitrary,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct Author {
    pub id: UserId,
    #[generator(bolero::gen_with::<String>().len(0..30usize))]
    pub name: String,
    pub role: Role,
    pub reputation: u32,
    #[generator(bolero::gen_arbitrary())]
    pub avatar_url: Option<String>,
}

/// The user currently looking at a discussion
///
/// This is trusted as-is: whatever it allows is only about which controls get
/// displayed, the collaborator re-checks everything.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    arbitrary::Arbitrary,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct Viewer {
    pub id: UserId,
    pub role: Role,
}

impl Viewer {
    pub fn stub() -> Viewer {
        Viewer {
            id: UserId::stub(),
            role: Role::Student,
        }
    }

    pub fn is_author(&self, c: &Comment) -> bool {
        self.id == c.author.id
    }

    pub fn can_moderate(&self) -> bool {
        self.role.can_moderate()
    }
}
