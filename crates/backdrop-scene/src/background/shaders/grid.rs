/// Grid lines: per-vertex color, faded by view distance
pub const SHADER_GRID: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    grid_model: mat4x4<f32>,
    cloud_model: mat4x4<f32>,
    params: vec4<f32>,
};

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) fade: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
) -> VsOut {
    var out: VsOut;

    let view_pos = uniforms.view * uniforms.grid_model * vec4<f32>(position, 1.0);
    out.position = uniforms.projection * view_pos;
    out.color = color;

    // Lines further than params.z from the eye vanish into the clear color
    out.fade = clamp(1.0 - (-view_pos.z) / uniforms.params.z, 0.0, 1.0);

    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, in.fade);
}
"#;
