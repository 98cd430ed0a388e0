use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use blueprint_auth::{Principal, Role, Username};
use blueprint_core::{InMemoryRepository, Repository};
use blueprint_courses::{Course, CourseId, CourseQueryHandler, ListCourses};
use blueprint_devices::{
    BroadbandAccessDevice, DeviceClient, DeviceType, ExchangeCode, Hostname, NetworkSerialNumberSource,
    ReconcileBroadbandAccessDevices,
};
use blueprint_events::QueryHandler;
use blueprint_infra::jobs::JobResults;
use blueprint_infra::simulated_devices::{SimulatedDevice, SimulatedDeviceNetwork};

fn course(n: usize) -> Course {
    Course::new(
        CourseId::new(),
        format!("course {n}"),
        "benchmark course".into(),
        Username::new("mrsmith"),
        vec![],
    )
}

fn bench_repository_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository_save");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert_new_course", |b| {
        let repo = InMemoryRepository::<Course>::new();
        let mut n = 0;
        b.iter(|| {
            n += 1;
            black_box(repo.save(course(n)).unwrap());
        });
    });

    group.bench_function("update_existing_course", |b| {
        let repo = InMemoryRepository::<Course>::new();
        let mut stored = repo.save(course(0)).unwrap();
        b.iter(|| {
            stored = repo.save(black_box(stored.clone())).unwrap();
        });
    });

    group.finish();
}

fn bench_course_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("course_listing");
    let reader = Principal::new("alice", Role::Student);

    for count in [10, 100, 1000].iter() {
        let repo = InMemoryRepository::<Course>::new();
        for n in 0..*count {
            repo.save(course(n)).unwrap();
        }
        let handler = CourseQueryHandler::new(repo);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(handler.handle(&reader, ListCourses).unwrap()));
        });
    }

    group.finish();
}

fn bench_reconciliation(c: &mut Criterion) {
    let mut group = c.benchmark_group("device_reconciliation");

    for count in [10, 100, 1000].iter() {
        let devices = Arc::new(InMemoryRepository::<BroadbandAccessDevice>::new());
        let network = Arc::new(SimulatedDeviceNetwork::new());
        for n in 0..*count {
            let hostname = format!("device{n}.exlon.com");
            devices
                .save(BroadbandAccessDevice::new(
                    Hostname::new(hostname.as_str()),
                    Some(format!("serial{n}")),
                    DeviceType::Adsl,
                    ExchangeCode::new("exch1"),
                    4,
                ))
                .unwrap();
            // Every tenth device stays silent.
            let device = if n % 10 == 0 {
                SimulatedDevice::TimesOut
            } else {
                SimulatedDevice::Answers(format!("serial{n}"))
            };
            network.set(hostname, device);
        }

        let client: Arc<dyn DeviceClient> = network;
        let reconcile = ReconcileBroadbandAccessDevices::new(devices, NetworkSerialNumberSource::new(client));
        let results = JobResults::default();

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                let tally = results.create_count();
                reconcile.reconcile(&tally).unwrap();
                black_box(tally.failures())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_repository_save, bench_course_listing, bench_reconciliation);
criterion_main!(benches);
