//! CLI enum types.

use clap::ValueEnum;

use crate::render::ImageRole;

/// Which series image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Role {
    #[default]
    Poster,
    Banner,
    Fanart,
}

impl From<Role> for ImageRole {
    fn from(r: Role) -> Self {
        match r {
            Role::Poster => ImageRole::Poster,
            Role::Banner => ImageRole::Banner,
            Role::Fanart => ImageRole::Fanart,
        }
    }
}
