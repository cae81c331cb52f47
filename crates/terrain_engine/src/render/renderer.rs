//! Terrain renderer
//!
//! Owns every GPU resource for the terrain scene and drives the per-frame
//! sequence: upload uniforms, drain the device, acquire a swapchain image,
//! move it into the render layout, submit its pre-recorded command buffer,
//! move it back to the present layout, present, and drain again. One frame
//! in flight, fully serialized.

use ash::vk;

use crate::camera::Camera;
use crate::config::AppConfig;
use crate::render::frame::{self, FramePlan};
use crate::render::uniforms::TerrainUbo;
use crate::render::vulkan::commands::{
    initial_present_barrier, post_present_barrier, pre_present_barrier, record_image_barrier,
};
use crate::render::vulkan::descriptor::PoolSizes;
use crate::render::vulkan::{
    CommandPool, DepthBuffer, DescriptorPool, DescriptorSetLayout, DescriptorSetLayoutBuilder,
    DescriptorSetWriter, Framebuffer, FrameSync, GraphicsPipeline, IndexBuffer, RenderPass,
    ShaderModule, Swapchain, SyncPolicy, TextureSet, UniformBuffer, VertexBuffer, VulkanContext,
    VulkanError, VulkanResult, Window,
};
use crate::terrain::TerrainMesh;

/// Descriptor binding for the uniform block
const BINDING_UNIFORMS: u32 = 0;
/// Descriptor binding for the dirt texture
const BINDING_DIRT: u32 = 1;
/// Descriptor binding for the grass texture
const BINDING_GRASS: u32 = 2;

struct PipelineResources {
    descriptor_set: vk::DescriptorSet,
    pipeline: GraphicsPipeline,
    descriptor_pool: DescriptorPool,
    descriptor_layout: DescriptorSetLayout,
}

struct MeshResources {
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    uniform_buffer: UniformBuffer<TerrainUbo>,
    textures: TextureSet,
}

/// Renderer for the single terrain scene
///
/// Fields are declared so that dependent resources drop before the device
/// and instance that created them.
pub struct TerrainRenderer {
    sync: FrameSync,
    sync_policy: SyncPolicy,
    command_buffers: Vec<vk::CommandBuffer>,
    barrier_command_buffers: Vec<vk::CommandBuffer>,
    plan: Option<FramePlan>,
    pipeline: Option<PipelineResources>,
    mesh_resources: Option<MeshResources>,
    framebuffers: Vec<Framebuffer>,
    depth_buffer: DepthBuffer,
    render_pass: RenderPass,
    command_pool: CommandPool,
    swapchain: Swapchain,
    config: AppConfig,
    prepared: bool,
    context: VulkanContext,
}

impl TerrainRenderer {
    /// Create the renderer's device-level state for the window
    pub fn new(window: &mut Window, config: &AppConfig) -> VulkanResult<Self> {
        let context = VulkanContext::new(window, &config.window.title)?;

        let (fb_width, fb_height) = window.get_framebuffer_size();
        let swapchain = Swapchain::new(
            context.instance(),
            context.raw_device(),
            context.surface,
            &context.surface_loader,
            &context.physical_device,
            vk::Extent2D {
                width: fb_width,
                height: fb_height,
            },
        )?;

        let command_pool = CommandPool::new(
            context.raw_device(),
            context.physical_device.graphics_family,
        )?;

        let render_pass = RenderPass::new_forward_pass(
            context.raw_device(),
            swapchain.format().format,
        )?;

        let depth_buffer = DepthBuffer::new(
            context.raw_device(),
            context.instance(),
            context.physical_device.device,
            swapchain.extent(),
        )?;

        let framebuffers: VulkanResult<Vec<Framebuffer>> = swapchain
            .image_views()
            .iter()
            .map(|&view| {
                let attachments = [view, depth_buffer.image_view()];
                Framebuffer::new(
                    context.raw_device(),
                    render_pass.handle(),
                    &attachments,
                    swapchain.extent(),
                )
            })
            .collect();
        let framebuffers = framebuffers?;

        let sync = FrameSync::new(context.raw_device())?;

        Ok(Self {
            sync,
            sync_policy: SyncPolicy::serialized(),
            command_buffers: Vec::new(),
            barrier_command_buffers: Vec::new(),
            plan: None,
            pipeline: None,
            mesh_resources: None,
            framebuffers,
            depth_buffer,
            render_pass,
            command_pool,
            swapchain,
            config: config.clone(),
            prepared: false,
            context,
        })
    }

    /// One-time setup: mesh upload, textures, uniforms, descriptors,
    /// pipeline, and the initial command buffer recording
    ///
    /// Any failure is terminal; the caller is expected to abort.
    pub fn prepare(&mut self) -> VulkanResult<()> {
        let mesh = TerrainMesh::generate(self.config.terrain.grid_size, self.config.terrain.spacing);
        log::info!(
            "Terrain mesh: {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        let device = self.context.raw_device();
        let instance = self.context.instance();
        let physical_device = self.context.physical_device.device;

        let vertex_buffer = VertexBuffer::new(
            device.clone(),
            instance,
            physical_device,
            &mesh.vertices,
        )?;
        let index_buffer = IndexBuffer::new(
            device.clone(),
            instance,
            physical_device,
            &mesh.indices,
        )?;
        let uniform_buffer: UniformBuffer<TerrainUbo> = UniformBuffer::new(
            device.clone(),
            instance,
            physical_device,
        )?;

        let textures = TextureSet::load(
            device.clone(),
            instance,
            physical_device,
            &self.command_pool,
            self.context.graphics_queue(),
            &self.config.textures,
        )?;

        let descriptor_layout = DescriptorSetLayoutBuilder::new()
            .add_uniform_buffer(BINDING_UNIFORMS, vk::ShaderStageFlags::VERTEX)
            .add_combined_image_sampler(BINDING_DIRT, vk::ShaderStageFlags::FRAGMENT)
            .add_combined_image_sampler(BINDING_GRASS, vk::ShaderStageFlags::FRAGMENT)
            .build(&device)?;

        let vertex_shader = ShaderModule::from_file(
            device.clone(),
            &self.config.shaders.vertex_shader_path,
        )?;
        let fragment_shader = ShaderModule::from_file(
            device.clone(),
            &self.config.shaders.fragment_shader_path,
        )?;

        let pipeline = GraphicsPipeline::new(
            device.clone(),
            self.render_pass.handle(),
            descriptor_layout.handle(),
            &vertex_shader,
            &fragment_shader,
        )?;

        let descriptor_pool = DescriptorPool::new(device.clone(), PoolSizes::terrain())?;
        let descriptor_sets = descriptor_pool
            .allocate_descriptor_sets(&[descriptor_layout.handle()])?;
        let descriptor_set = descriptor_sets[0];

        DescriptorSetWriter::new()
            .write_buffer(
                descriptor_set,
                BINDING_UNIFORMS,
                uniform_buffer.handle(),
                0,
                uniform_buffer.range(),
            )
            .write_image(
                descriptor_set,
                BINDING_DIRT,
                textures.dirt.image_view(),
                textures.dirt.sampler(),
                vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
            )
            .write_image(
                descriptor_set,
                BINDING_GRASS,
                textures.grass.image_view(),
                textures.grass.sampler(),
                vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
            )
            .update(&device);

        // Fresh swapchain images start undefined; the per-frame acquire
        // barrier expects PRESENT_SRC
        let images: Vec<vk::Image> = self.swapchain.images().to_vec();
        self.command_pool.submit_one_time(
            self.context.graphics_queue(),
            |device, command_buffer| {
                for &image in &images {
                    record_image_barrier(
                        device,
                        command_buffer,
                        initial_present_barrier(image),
                        vk::PipelineStageFlags::TOP_OF_PIPE,
                        vk::PipelineStageFlags::BOTTOM_OF_PIPE,
                    );
                }
            },
        )?;

        // Two dedicated buffers for the per-frame layout transitions
        self.barrier_command_buffers = self.command_pool.allocate_command_buffers(2)?;

        let index_count = index_buffer.index_count();
        self.mesh_resources = Some(MeshResources {
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            textures,
        });
        self.pipeline = Some(PipelineResources {
            descriptor_set,
            pipeline,
            descriptor_pool,
            descriptor_layout,
        });

        let extent = self.swapchain.extent();
        self.plan = Some(FramePlan::new(
            self.config.clear_color,
            extent.width,
            extent.height,
            index_count,
        ));

        self.build_command_buffers()?;
        self.prepared = true;

        log::info!("Renderer prepared, {} frame in flight", self.sync_policy.frames_in_flight);
        Ok(())
    }

    /// Record one command buffer per swapchain image from the current plan.
    ///
    /// If an existing set is invalid (count differs from the swapchain image
    /// count) the whole set is freed and recreated; buffers are never
    /// patched individually. Recording from an unchanged plan produces
    /// identical command streams.
    pub fn build_command_buffers(&mut self) -> VulkanResult<()> {
        let plan = self.plan.ok_or_else(|| VulkanError::InvalidOperation {
            reason: "No frame plan to record from".to_string(),
        })?;
        let pipeline = self.pipeline.as_ref().ok_or_else(|| VulkanError::InvalidOperation {
            reason: "Pipeline not created".to_string(),
        })?;
        let mesh = self.mesh_resources.as_ref().ok_or_else(|| VulkanError::InvalidOperation {
            reason: "Mesh resources not created".to_string(),
        })?;

        let image_count = self.swapchain.image_count() as usize;
        if !frame::command_buffers_valid(self.command_buffers.len(), image_count) {
            if !self.command_buffers.is_empty() {
                self.command_pool.free_command_buffers(&self.command_buffers);
            }
            self.command_buffers = self.command_pool.allocate_command_buffers(image_count as u32)?;
        }

        let device = self.context.raw_device();

        let clear_values = [
            vk::ClearValue {
                color: vk::ClearColorValue {
                    float32: plan.clear_color,
                },
            },
            vk::ClearValue {
                depth_stencil: vk::ClearDepthStencilValue {
                    depth: plan.clear_depth,
                    stencil: plan.clear_stencil,
                },
            },
        ];

        let render_area = vk::Rect2D {
            offset: vk::Offset2D { x: 0, y: 0 },
            extent: vk::Extent2D {
                width: plan.width,
                height: plan.height,
            },
        };

        let viewport = vk::Viewport {
            x: 0.0,
            y: 0.0,
            width: plan.width as f32,
            height: plan.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        };

        for (index, &command_buffer) in self.command_buffers.iter().enumerate() {
            let begin_info = vk::CommandBufferBeginInfo::builder();

            unsafe {
                device.begin_command_buffer(command_buffer, &begin_info)
                    .map_err(VulkanError::Api)?;

                let render_pass_begin = vk::RenderPassBeginInfo::builder()
                    .render_pass(self.render_pass.handle())
                    .framebuffer(self.framebuffers[index].handle())
                    .render_area(render_area)
                    .clear_values(&clear_values);

                device.cmd_begin_render_pass(
                    command_buffer,
                    &render_pass_begin,
                    vk::SubpassContents::INLINE,
                );

                device.cmd_set_viewport(command_buffer, 0, &[viewport]);
                device.cmd_set_scissor(command_buffer, 0, &[render_area]);

                device.cmd_bind_descriptor_sets(
                    command_buffer,
                    vk::PipelineBindPoint::GRAPHICS,
                    pipeline.pipeline.layout(),
                    0,
                    &[pipeline.descriptor_set],
                    &[],
                );
                device.cmd_bind_pipeline(
                    command_buffer,
                    vk::PipelineBindPoint::GRAPHICS,
                    pipeline.pipeline.handle(),
                );

                device.cmd_bind_vertex_buffers(
                    command_buffer,
                    0,
                    &[mesh.vertex_buffer.handle()],
                    &[0],
                );
                device.cmd_bind_index_buffer(
                    command_buffer,
                    mesh.index_buffer.handle(),
                    0,
                    vk::IndexType::UINT32,
                );
                device.cmd_draw_indexed(command_buffer, plan.index_count, 1, 0, 0, 0);

                device.cmd_end_render_pass(command_buffer);

                device.end_command_buffer(command_buffer)
                    .map_err(VulkanError::Api)?;
            }
        }

        Ok(())
    }

    /// Rewrite the uniform block from the camera's current matrices
    pub fn update_uniform_buffers(&self, camera: &Camera) -> VulkanResult<()> {
        let mesh = self.mesh_resources.as_ref().ok_or_else(|| VulkanError::InvalidOperation {
            reason: "Uniform buffer not created".to_string(),
        })?;
        mesh.uniform_buffer.update(&TerrainUbo::from_camera(camera))
    }

    /// Render one frame. No-op until `prepare` has completed.
    pub fn render(&mut self, camera: &Camera) -> VulkanResult<()> {
        if !self.prepared {
            return Ok(());
        }

        self.update_uniform_buffers(camera)?;

        // Full drain before touching the swapchain
        self.context.wait_idle()?;

        let image_index = self.swapchain.acquire_next_image(self.sync.image_available.handle())?;
        let image = self.swapchain.images()[image_index as usize];

        self.submit_barrier(self.barrier_command_buffers[0], post_present_barrier(image))?;

        let device = self.context.raw_device();
        let wait_semaphores = [self.sync.image_available.handle()];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let command_buffers = [self.command_buffers[image_index as usize]];
        let signal_semaphores = [self.sync.render_finished.handle()];

        let submit_info = vk::SubmitInfo::builder()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores)
            .build();

        unsafe {
            device.queue_submit(self.context.graphics_queue(), &[submit_info], vk::Fence::null())
                .map_err(VulkanError::Api)?;
        }

        self.submit_barrier(self.barrier_command_buffers[1], pre_present_barrier(image))?;

        self.swapchain.present(
            self.context.present_queue(),
            image_index,
            self.sync.render_finished.handle(),
        )?;

        self.context.wait_queue_idle()?;
        self.context.wait_idle()?;

        Ok(())
    }

    /// Record and submit a single-barrier command buffer on the graphics
    /// queue, ordered by queue submission rather than semaphores
    fn submit_barrier(
        &self,
        command_buffer: vk::CommandBuffer,
        barrier: vk::ImageMemoryBarrier,
    ) -> VulkanResult<()> {
        let device = self.context.raw_device();
        let begin_info = vk::CommandBufferBeginInfo::builder()
            .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);

        unsafe {
            device.begin_command_buffer(command_buffer, &begin_info)
                .map_err(VulkanError::Api)?;
        }

        record_image_barrier(
            &device,
            command_buffer,
            barrier,
            vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
        );

        unsafe {
            device.end_command_buffer(command_buffer)
                .map_err(VulkanError::Api)?;

            let command_buffers = [command_buffer];
            let submit_info = vk::SubmitInfo::builder()
                .command_buffers(&command_buffers)
                .build();

            device.queue_submit(self.context.graphics_queue(), &[submit_info], vk::Fence::null())
                .map_err(VulkanError::Api)?;
        }

        Ok(())
    }

    /// The frame pacing policy in effect
    pub fn sync_policy(&self) -> SyncPolicy {
        self.sync_policy
    }

    /// Whether setup has completed and `render` will do work
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// The plan command buffers are currently recorded from
    pub fn frame_plan(&self) -> Option<FramePlan> {
        self.plan
    }
}
