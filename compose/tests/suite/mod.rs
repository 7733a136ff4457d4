mod pipeline;
mod render;
