/// Particles: one camera-facing quad per instance, soft round falloff
pub const SHADER_PARTICLES: &str = r#"
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
    @location(1) corner: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec3<f32>,
    @location(1) color: vec3<f32>,
) -> VsOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    let corner = corners[vertex_index];

    // Expand in view space so the quad always faces the camera
    let view_pos = uniforms.view * uniforms.cloud_model * vec4<f32>(center, 1.0);
    let half_size = uniforms.params.x * 0.5;
    let expanded = vec4<f32>(view_pos.xy + corner * half_size, view_pos.z, 1.0);

    var out: VsOut;
    out.position = uniforms.projection * expanded;
    out.color = color;
    out.corner = corner;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let d = length(in.corner);
    if (d > 1.0) {
        discard;
    }
    let alpha = 1.0 - smoothstep(0.5, 1.0, d);
    return vec4<f32>(in.color * alpha, alpha);
}
"#;
