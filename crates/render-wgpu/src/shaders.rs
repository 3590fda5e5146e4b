/// WGSL shader for instanced cell quads: white cells, positioned in NDC.
pub const CELL_SHADER: &str = r#"
struct VertexInput {
    @location(0) corner: vec2<f32>,
};

struct InstanceInput {
    @location(1) origin: vec2<f32>,
    @location(2) size: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    let pos = instance.origin + vertex.corner * instance.size;
    return vec4<f32>(pos, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;
