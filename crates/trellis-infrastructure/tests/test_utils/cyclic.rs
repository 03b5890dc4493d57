//! Two services that need each other

use std::sync::Arc;

use trellis_domain::{BoxError, Role};
use trellis_infrastructure::di::{Dependency, Injectable, Injector};
use trellis_infrastructure::register_component;

pub struct Ping {
    pub pong: Arc<Pong>,
}

impl Injectable for Ping {
    const ROLE: Role = Role::Service;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<Pong>("pong")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            pong: injector.get()?,
        })
    }
}

pub struct Pong {
    pub ping: Arc<Ping>,
}

impl Injectable for Pong {
    const ROLE: Role = Role::Service;

    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::on::<Ping>("ping")]
    }

    fn construct(injector: &Injector<'_>) -> Result<Self, BoxError> {
        Ok(Self {
            ping: injector.get()?,
        })
    }
}

register_component!(CYCLIC_PING, Ping);
register_component!(CYCLIC_PONG, Pong);
