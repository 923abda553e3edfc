mod diagnose;
mod health;
mod optimize;
