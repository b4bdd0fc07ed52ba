mod common;
mod nwo;
