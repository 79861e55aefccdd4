/// GPU buffers holding one loaded scene
pub struct SceneBuffers {
    pub grid_vertices: wgpu::Buffer,
    pub grid_vertex_count: u32,
    pub positions: wgpu::Buffer,
    pub colors: wgpu::Buffer,
    pub particle_count: u32,
}

/// Pipelines shared by every frame
pub struct ScenePipelines {
    pub grid: wgpu::RenderPipeline,
    pub particles: wgpu::RenderPipeline,
}

/// Clear the target, then draw the grid followed by the particles
pub fn render_scene_pass(
    encoder: &mut wgpu::CommandEncoder,
    pipelines: &ScenePipelines,
    bind_group: &wgpu::BindGroup,
    buffers: &SceneBuffers,
    clear_color: wgpu::Color,
    output_view: &wgpu::TextureView,
) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Backdrop Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: output_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear_color),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    render_pass.set_bind_group(0, bind_group, &[]);

    render_pass.set_pipeline(&pipelines.grid);
    render_pass.set_vertex_buffer(0, buffers.grid_vertices.slice(..));
    render_pass.draw(0..buffers.grid_vertex_count, 0..1);

    render_pass.set_pipeline(&pipelines.particles);
    render_pass.set_vertex_buffer(0, buffers.positions.slice(..));
    render_pass.set_vertex_buffer(1, buffers.colors.slice(..));
    render_pass.draw(0..6, 0..buffers.particle_count);
}
