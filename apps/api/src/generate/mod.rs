// Generation proxy: resolve the prompt source, assemble the two prompt
// blocks, make exactly one upstream completion call.

pub mod handlers;
pub mod prompts;
