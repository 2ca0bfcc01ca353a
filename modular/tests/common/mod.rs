#![allow(dead_code)]

use std::cell::Cell;
use std::fmt::Debug;

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub trait Shape: Debug {
    fn set_area(&self, area: i32);
    fn area(&self) -> i32;
}

#[derive(Debug)]
pub struct Circle {
    area: Cell<i32>,
}

impl Circle {
    pub fn new(area: i32) -> Self {
        Self {
            area: Cell::new(area),
        }
    }
}

impl Shape for Circle {
    fn set_area(&self, area: i32) {
        self.area.set(area);
    }

    fn area(&self) -> i32 {
        self.area.get()
    }
}

pub trait Database: Debug {
    fn connect(&self) -> bool;
}

#[derive(Debug)]
pub struct MySql;

impl Database for MySql {
    fn connect(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct AppError(pub &'static str);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "app: {}", self.0)
    }
}

impl std::error::Error for AppError {}
