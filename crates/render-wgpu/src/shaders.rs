/// WGSL shader for instanced voxel cubes with flat directional + ambient light
/// and linear distance fog.
pub const VOXEL_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    // xyz: direction towards the light, w: ambient intensity
    light: vec4<f32>,
    // x: directional intensity
    light_params: vec4<f32>,
    // xyz: camera position
    eye: vec4<f32>,
    fog_color: vec4<f32>,
    // x: fog start distance, y: fog end distance
    fog_range: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) offset: vec3<f32>,
    @location(3) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
    @location(2) world_pos: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world_pos = vec4<f32>(vertex.position + instance.offset, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.normal = vertex.normal;
    out.color = instance.color;
    out.world_pos = world_pos.xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let diffuse = max(dot(in.normal, uniforms.light.xyz), 0.0);
    let lighting = min(uniforms.light.w + diffuse * uniforms.light_params.x, 1.0);
    let lit = in.color.rgb * lighting;

    let dist = distance(in.world_pos, uniforms.eye.xyz);
    let fog = clamp(
        (dist - uniforms.fog_range.x) / (uniforms.fog_range.y - uniforms.fog_range.x),
        0.0,
        1.0,
    );
    return vec4<f32>(mix(lit, uniforms.fog_color.rgb, fog), in.color.a);
}
"#;
