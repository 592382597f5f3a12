use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quadtree::quadtree::{Bounded, ObjectId, Quadtree};
use quadtree::shapes::Rectangle;
use rand::prelude::*;

struct Particle {
    id: ObjectId,
    bounds: Rectangle,
}

impl Particle {
    fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id: ObjectId::new(id),
            bounds: Rectangle::new(x, y, 5.0, 5.0),
        }
    }
}

impl Bounded for Particle {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn bounding_box(&self) -> Rectangle {
        self.bounds
    }
}

fn populated_tree(rng: &mut ThreadRng, count: u32) -> (Quadtree, Vec<Particle>) {
    let mut quadtree = Quadtree::new(Rectangle::new(0.0, 0.0, 1000.0, 1000.0));
    let mut particles = Vec::new();
    for id in 0..count {
        let particle = Particle::new(
            id,
            rng.gen_range(0.0..995.0),
            rng.gen_range(0.0..995.0),
        );
        quadtree.insert(&particle).unwrap();
        particles.push(particle);
    }
    (quadtree, particles)
}

fn insert_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut quadtree = Quadtree::new(Rectangle::new(0.0, 0.0, 1000.0, 1000.0));

    c.bench_function("quadtree_insert", |b| {
        let mut next_id = 0u32;
        b.iter(|| {
            let particle = Particle::new(
                next_id,
                rng.gen_range(0.0..995.0),
                rng.gen_range(0.0..995.0),
            );
            next_id = next_id.wrapping_add(1);
            quadtree.insert(black_box(&particle)).unwrap();
        })
    });
}

fn update_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut quadtree, mut particles) = populated_tree(&mut rng, 1000);

    c.bench_function("quadtree_update", |b| {
        b.iter(|| {
            let index = rng.gen_range(0..particles.len());
            let particle = &mut particles[index];
            particle.bounds.x = (particle.bounds.x + rng.gen_range(-5.0..5.0)).clamp(0.0, 995.0);
            particle.bounds.y = (particle.bounds.y + rng.gen_range(-5.0..5.0)).clamp(0.0, 995.0);
            quadtree.update(black_box(&*particle)).unwrap();
        })
    });
}

fn retrieve_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut quadtree, _particles) = populated_tree(&mut rng, 1000);
    let mut result = Vec::new();

    c.bench_function("quadtree_retrieve", |b| {
        b.iter(|| {
            let window = Rectangle::new(
                rng.gen_range(0.0..900.0),
                rng.gen_range(0.0..900.0),
                100.0,
                100.0,
            );
            result.clear();
            quadtree.retrieve_into(black_box(&window), &mut result);
            black_box(result.len());
        })
    });
}

fn remove_reinsert_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (mut quadtree, particles) = populated_tree(&mut rng, 1000);

    c.bench_function("quadtree_remove_reinsert", |b| {
        b.iter(|| {
            let particle = &particles[rng.gen_range(0..particles.len())];
            quadtree.remove(black_box(particle)).unwrap();
            quadtree.insert(black_box(particle)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    insert_benchmark,
    update_benchmark,
    retrieve_benchmark,
    remove_reinsert_benchmark
);
criterion_main!(benches);
