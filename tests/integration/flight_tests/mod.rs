mod snapshot;
mod termination;
mod tick;
