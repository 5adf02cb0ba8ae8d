mod health;
mod helpers;
mod metrics;
mod register;
