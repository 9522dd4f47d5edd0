mod ring_buffer;
mod telemetry_snapshot;
