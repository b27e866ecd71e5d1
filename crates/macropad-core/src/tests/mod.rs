mod catalog;
mod registry;
mod support;
