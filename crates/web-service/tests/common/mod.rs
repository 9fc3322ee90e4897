//! 测试公共代码
//!
//! [`MemoryDb`] 在内存中实现了全部仓库 trait，外键的级联与置空行为与迁移脚本一致，
//! 服务层和路由测试都不需要真实的 PostgreSQL。

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use database::*;
use shared_lib::AppConfig;
use sqlx::error::ErrorKind;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Mutex};
use web_service::AppState;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[derive(Default)]
struct Tables {
    next_id: i32,
    service_types: Vec<ServiceTypeInfo>,
    work_types: Vec<WorkTypeInfo>,
    brigades: Vec<BrigadaInfo>,
    locations: Vec<LocationInfo>,
    locomotives: Vec<LocomotiveInfo>,
    employees: Vec<EmployeeInfo>,
    leave_types: Vec<LeaveTypeInfo>,
    leaves: Vec<LeaveInfo>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn service_type_name(&self, id: Option<i32>) -> Option<String> {
        id.and_then(|id| self.service_types.iter().find(|s| s.id == id)).map(|s| s.name.clone())
    }

    fn work_type(&self, mut work_type: WorkTypeInfo) -> WorkTypeInfo {
        work_type.service_type_name = self.service_type_name(Some(work_type.service_type_id)).unwrap_or_default();
        work_type
    }

    fn locomotive(&self, mut locomotive: LocomotiveInfo) -> LocomotiveInfo {
        locomotive.location_work_name = locomotive
            .location_work_id
            .and_then(|id| self.locations.iter().find(|l| l.id == id))
            .map(|l| l.name.clone());
        locomotive.service_type_name = self.service_type_name(locomotive.service_type_id);
        locomotive.work_type_name = locomotive
            .work_type_id
            .and_then(|id| self.work_types.iter().find(|w| w.id == id))
            .map(|w| w.name.clone());
        locomotive
    }

    fn employee(&self, mut employee: EmployeeInfo) -> EmployeeInfo {
        employee.service_type_name = self.service_type_name(employee.service_type_id);
        employee.work_type_name = employee
            .work_type_id
            .and_then(|id| self.work_types.iter().find(|w| w.id == id))
            .map(|w| w.name.clone());
        employee.brigada_name = employee
            .brigada_id
            .and_then(|id| self.brigades.iter().find(|b| b.id == id))
            .map(|b| b.name.clone());
        employee.locomotive_number = employee
            .locomotive_id
            .and_then(|id| self.locomotives.iter().find(|l| l.id == id))
            .map(|l| l.number.clone());
        employee
    }

    fn leave(&self, mut leave: LeaveInfo) -> LeaveInfo {
        if let Some(employee) = self.employees.iter().find(|e| e.id == leave.employee_id) {
            leave.employee_name = employee.full_name();
        }
        if let Some(leave_type) = self.leave_types.iter().find(|t| t.id == leave.leave_type_id) {
            leave.leave_type_name = leave_type.name.clone();
        }
        leave
    }

    fn leaves_where<F: Fn(&LeaveInfo) -> bool>(&self, predicate: F) -> Vec<LeaveInfo> {
        let mut leaves: Vec<LeaveInfo> =
            self.leaves.iter().filter(|l| predicate(*l)).cloned().map(|l| self.leave(l)).collect();
        leaves.sort_by_key(|l| (l.start_date, l.id));
        leaves
    }

    fn insert_leave(&mut self, leave: LeaveCreate) -> LeaveInfo {
        let info = LeaveInfo {
            id: self.next_id(),
            employee_id: leave.employee_id,
            employee_name: String::new(),
            leave_type_id: leave.leave_type_id,
            leave_type_name: String::new(),
            start_date: leave.start_date,
            end_date: leave.end_date,
            comment: leave.comment,
        };
        self.leaves.push(info.clone());
        self.leave(info)
    }

    /// 与 `leaves_no_overlap` 排他约束相同的判断
    fn violates_no_overlap(&self, employee_id: i32, start: NaiveDate, end: NaiveDate, id: Option<i32>) -> bool {
        self.leaves
            .iter()
            .any(|l| l.employee_id == employee_id && Some(l.id) != id && l.overlaps(start, end))
    }

    fn employees_sorted<F: Fn(&EmployeeInfo) -> bool>(&self, predicate: F) -> Vec<EmployeeInfo> {
        let mut employees: Vec<EmployeeInfo> =
            self.employees.iter().filter(|e| predicate(*e)).cloned().map(|e| self.employee(e)).collect();
        employees.sort_by(|a, b| (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id)));
        employees
    }
}

fn by_name<T, F: Fn(&T) -> &str>(mut items: Vec<T>, name: F) -> Vec<T> {
    items.sort_by(|a, b| name(a).cmp(name(b)));
    items
}

/// PostgreSQL 返回的约束错误
#[derive(Debug)]
struct PgError(&'static str);

impl fmt::Display for PgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sqlstate {}", self.0)
    }
}

impl std::error::Error for PgError {}

impl sqlx::error::DatabaseError for PgError {
    fn message(&self) -> &str {
        "conflicting key value violates exclusion constraint \"leaves_no_overlap\""
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.0))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

fn exclusion_violation() -> DatabaseError {
    DatabaseError::SqlxError(sqlx::Error::Database(Box::new(PgError(EXCLUSION_VIOLATION))))
}

/// 内存数据库
#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
    concurrent_leave: Mutex<Option<LeaveCreate>>,
}

impl MemoryDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut tables = self.tables.lock().unwrap();
        f(&mut tables)
    }

    pub fn leave_count(&self) -> usize {
        self.with(|t| t.leaves.len())
    }

    /// 模拟并发请求：下一次写入假期之前，另一个请求先保存了 `leave`
    pub fn save_concurrently_before_next_write(&self, leave: LeaveCreate) {
        *self.concurrent_leave.lock().unwrap() = Some(leave);
    }

    fn apply_concurrent_write(&self) {
        if let Some(leave) = self.concurrent_leave.lock().unwrap().take() {
            self.with(|t| t.insert_leave(leave));
        }
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            service_types: self.clone(),
            work_types: self.clone(),
            brigades: self.clone(),
            locations: self.clone(),
            locomotives: self.clone(),
            employees: self.clone(),
            leave_types: self.clone(),
            leaves: self.clone(),
        }
    }
}

#[async_trait]
impl ServiceTypeRepositoryTrait for MemoryDb {
    async fn find_service_types(&self) -> DatabaseResult<Vec<ServiceTypeInfo>> {
        Ok(self.with(|t| by_name(t.service_types.clone(), |s| s.name.as_str())))
    }

    async fn get_service_type_by_id(&self, id: i32) -> DatabaseResult<Option<ServiceTypeInfo>> {
        Ok(self.with(|t| t.service_types.iter().find(|s| s.id == id).cloned()))
    }

    async fn find_service_type_by_name(&self, name: &str) -> DatabaseResult<Option<ServiceTypeInfo>> {
        Ok(self.with(|t| t.service_types.iter().find(|s| s.name == name).cloned()))
    }

    async fn create_service_type(&self, service_type: ServiceTypeCreate) -> DatabaseResult<ServiceTypeInfo> {
        Ok(self.with(|t| {
            let info = ServiceTypeInfo {
                id: t.next_id(),
                name: service_type.name,
                description: service_type.description,
            };
            t.service_types.push(info.clone());
            info
        }))
    }

    async fn update_service_type(&self, id: i32, update: ServiceTypeUpdate) -> DatabaseResult<Option<ServiceTypeInfo>> {
        Ok(self.with(|t| {
            let row = t.service_types.iter_mut().find(|s| s.id == id)?;
            if let Some(name) = update.name {
                row.name = name;
            }
            if update.description.is_some() {
                row.description = update.description;
            }
            Some(row.clone())
        }))
    }

    async fn delete_service_type(&self, id: i32) -> DatabaseResult<Option<ServiceTypeInfo>> {
        Ok(self.with(|t| {
            let index = t.service_types.iter().position(|s| s.id == id)?;
            let removed = t.service_types.remove(index);

            // 工种级联删除，员工与机车上的引用置空
            let dropped: Vec<i32> = t.work_types.iter().filter(|w| w.service_type_id == id).map(|w| w.id).collect();
            t.work_types.retain(|w| w.service_type_id != id);
            for employee in t.employees.iter_mut() {
                if employee.service_type_id == Some(id) {
                    employee.service_type_id = None;
                }
                if employee.work_type_id.is_some_and(|w| dropped.contains(&w)) {
                    employee.work_type_id = None;
                }
            }
            for locomotive in t.locomotives.iter_mut() {
                if locomotive.service_type_id == Some(id) {
                    locomotive.service_type_id = None;
                }
                if locomotive.work_type_id.is_some_and(|w| dropped.contains(&w)) {
                    locomotive.work_type_id = None;
                }
            }
            Some(removed)
        }))
    }
}

#[async_trait]
impl WorkTypeRepositoryTrait for MemoryDb {
    async fn find_work_types(&self, service_type_id: Option<i32>) -> DatabaseResult<Vec<WorkTypeInfo>> {
        Ok(self.with(|t| {
            let rows: Vec<WorkTypeInfo> = t
                .work_types
                .iter()
                .filter(|w| service_type_id.map_or(true, |id| w.service_type_id == id))
                .cloned()
                .map(|w| t.work_type(w))
                .collect();
            by_name(rows, |w| w.name.as_str())
        }))
    }

    async fn get_work_type_by_id(&self, id: i32) -> DatabaseResult<Option<WorkTypeInfo>> {
        Ok(self.with(|t| t.work_types.iter().find(|w| w.id == id).cloned().map(|w| t.work_type(w))))
    }

    async fn find_work_type_by_name(&self, service_type_id: i32, name: &str) -> DatabaseResult<Option<WorkTypeInfo>> {
        Ok(self.with(|t| {
            t.work_types
                .iter()
                .find(|w| w.service_type_id == service_type_id && w.name == name)
                .cloned()
                .map(|w| t.work_type(w))
        }))
    }

    async fn count_work_type_references(&self, id: i32) -> DatabaseResult<i64> {
        Ok(self.with(|t| {
            let employees = t.employees.iter().filter(|e| e.work_type_id == Some(id)).count();
            let locomotives = t.locomotives.iter().filter(|l| l.work_type_id == Some(id)).count();
            (employees + locomotives) as i64
        }))
    }

    async fn create_work_type(&self, work_type: WorkTypeCreate) -> DatabaseResult<WorkTypeInfo> {
        Ok(self.with(|t| {
            let info = WorkTypeInfo {
                id: t.next_id(),
                name: work_type.name,
                description: work_type.description,
                service_type_id: work_type.service_type_id,
                service_type_name: String::new(),
            };
            t.work_types.push(info.clone());
            t.work_type(info)
        }))
    }

    async fn update_work_type(&self, id: i32, update: WorkTypeUpdate) -> DatabaseResult<Option<WorkTypeInfo>> {
        Ok(self.with(|t| {
            let row = t.work_types.iter_mut().find(|w| w.id == id)?;
            if let Some(name) = update.name {
                row.name = name;
            }
            if update.description.is_some() {
                row.description = update.description;
            }
            if let Some(service_type_id) = update.service_type_id {
                row.service_type_id = service_type_id;
            }
            let row = row.clone();
            Some(t.work_type(row))
        }))
    }

    async fn delete_work_type(&self, id: i32) -> DatabaseResult<Option<WorkTypeInfo>> {
        Ok(self.with(|t| {
            let index = t.work_types.iter().position(|w| w.id == id)?;
            let removed = t.work_types.remove(index);
            for employee in t.employees.iter_mut().filter(|e| e.work_type_id == Some(id)) {
                employee.work_type_id = None;
            }
            for locomotive in t.locomotives.iter_mut().filter(|l| l.work_type_id == Some(id)) {
                locomotive.work_type_id = None;
            }
            Some(t.work_type(removed))
        }))
    }
}

#[async_trait]
impl BrigadaRepositoryTrait for MemoryDb {
    async fn find_brigades(&self) -> DatabaseResult<Vec<BrigadaInfo>> {
        Ok(self.with(|t| by_name(t.brigades.clone(), |b| b.name.as_str())))
    }

    async fn get_brigada_by_id(&self, id: i32) -> DatabaseResult<Option<BrigadaInfo>> {
        Ok(self.with(|t| t.brigades.iter().find(|b| b.id == id).cloned()))
    }

    async fn find_brigada_by_name(&self, name: &str) -> DatabaseResult<Option<BrigadaInfo>> {
        Ok(self.with(|t| t.brigades.iter().find(|b| b.name == name).cloned()))
    }

    async fn create_brigada(&self, brigada: BrigadaCreate) -> DatabaseResult<BrigadaInfo> {
        Ok(self.with(|t| {
            let info = BrigadaInfo {
                id: t.next_id(),
                name: brigada.name,
                description: brigada.description,
            };
            t.brigades.push(info.clone());
            info
        }))
    }

    async fn update_brigada(&self, id: i32, update: BrigadaUpdate) -> DatabaseResult<Option<BrigadaInfo>> {
        Ok(self.with(|t| {
            let row = t.brigades.iter_mut().find(|b| b.id == id)?;
            if let Some(name) = update.name {
                row.name = name;
            }
            if update.description.is_some() {
                row.description = update.description;
            }
            Some(row.clone())
        }))
    }

    async fn delete_brigada(&self, id: i32) -> DatabaseResult<Option<BrigadaInfo>> {
        Ok(self.with(|t| {
            let index = t.brigades.iter().position(|b| b.id == id)?;
            Some(t.brigades.remove(index))
        }))
    }
}

#[async_trait]
impl LocationRepositoryTrait for MemoryDb {
    async fn find_locations(&self) -> DatabaseResult<Vec<LocationInfo>> {
        Ok(self.with(|t| by_name(t.locations.clone(), |l| l.name.as_str())))
    }

    async fn get_location_by_id(&self, id: i32) -> DatabaseResult<Option<LocationInfo>> {
        Ok(self.with(|t| t.locations.iter().find(|l| l.id == id).cloned()))
    }

    async fn find_location_by_name(&self, name: &str) -> DatabaseResult<Option<LocationInfo>> {
        Ok(self.with(|t| t.locations.iter().find(|l| l.name == name).cloned()))
    }

    async fn create_location(&self, location: LocationCreate) -> DatabaseResult<LocationInfo> {
        Ok(self.with(|t| {
            let info = LocationInfo {
                id: t.next_id(),
                name: location.name,
                address: location.address,
                description: location.description,
            };
            t.locations.push(info.clone());
            info
        }))
    }

    async fn update_location(&self, id: i32, update: LocationUpdate) -> DatabaseResult<Option<LocationInfo>> {
        Ok(self.with(|t| {
            let row = t.locations.iter_mut().find(|l| l.id == id)?;
            if let Some(name) = update.name {
                row.name = name;
            }
            if update.address.is_some() {
                row.address = update.address;
            }
            if update.description.is_some() {
                row.description = update.description;
            }
            Some(row.clone())
        }))
    }

    async fn delete_location(&self, id: i32) -> DatabaseResult<Option<LocationInfo>> {
        Ok(self.with(|t| {
            let index = t.locations.iter().position(|l| l.id == id)?;
            Some(t.locations.remove(index))
        }))
    }
}

#[async_trait]
impl LocomotiveRepositoryTrait for MemoryDb {
    async fn find_locomotives(&self) -> DatabaseResult<Vec<LocomotiveInfo>> {
        Ok(self.with(|t| {
            let rows: Vec<LocomotiveInfo> = t.locomotives.iter().cloned().map(|l| t.locomotive(l)).collect();
            by_name(rows, |l| l.number.as_str())
        }))
    }

    async fn get_locomotive_by_id(&self, id: i32) -> DatabaseResult<Option<LocomotiveInfo>> {
        Ok(self.with(|t| t.locomotives.iter().find(|l| l.id == id).cloned().map(|l| t.locomotive(l))))
    }

    async fn find_locomotive_by_number(&self, number: &str) -> DatabaseResult<Option<LocomotiveInfo>> {
        Ok(self.with(|t| t.locomotives.iter().find(|l| l.number == number).cloned().map(|l| t.locomotive(l))))
    }

    async fn count_locomotives_by_location(&self, location_work_id: i32) -> DatabaseResult<i64> {
        Ok(self.with(|t| {
            t.locomotives
                .iter()
                .filter(|l| l.location_work_id == Some(location_work_id))
                .count() as i64
        }))
    }

    async fn create_locomotive(&self, locomotive: LocomotiveCreate) -> DatabaseResult<LocomotiveInfo> {
        Ok(self.with(|t| {
            let info = LocomotiveInfo {
                id: t.next_id(),
                number: locomotive.number,
                series: locomotive.series,
                location_work_id: locomotive.location_work_id,
                location_work_name: None,
                service_type_id: locomotive.service_type_id,
                service_type_name: None,
                work_type_id: locomotive.work_type_id,
                work_type_name: None,
            };
            t.locomotives.push(info.clone());
            t.locomotive(info)
        }))
    }

    async fn update_locomotive(&self, id: i32, update: LocomotiveUpdate) -> DatabaseResult<Option<LocomotiveInfo>> {
        Ok(self.with(|t| {
            let row = t.locomotives.iter_mut().find(|l| l.id == id)?;
            if let Some(number) = update.number {
                row.number = number;
            }
            if update.series.is_some() {
                row.series = update.series;
            }
            if let Some(v) = update.location_work_id {
                row.location_work_id = v;
            }
            if let Some(v) = update.service_type_id {
                row.service_type_id = v;
            }
            if let Some(v) = update.work_type_id {
                row.work_type_id = v;
            }
            let row = row.clone();
            Some(t.locomotive(row))
        }))
    }

    async fn delete_locomotive(&self, id: i32) -> DatabaseResult<Option<LocomotiveInfo>> {
        Ok(self.with(|t| {
            let index = t.locomotives.iter().position(|l| l.id == id)?;
            let removed = t.locomotives.remove(index);
            Some(t.locomotive(removed))
        }))
    }
}

#[async_trait]
impl EmployeeRepositoryTrait for MemoryDb {
    async fn find_employees(&self) -> DatabaseResult<Vec<EmployeeInfo>> {
        Ok(self.with(|t| t.employees_sorted(|_| true)))
    }

    async fn search_employees(&self, search: EmployeeSearch) -> DatabaseResult<EmployeeSearchResult> {
        Ok(self.with(|t| {
            let keyword = search.keyword.as_deref().unwrap_or_default().to_lowercase();
            let matched = t.employees_sorted(|e| {
                let keyword_hit = keyword.is_empty()
                    || [Some(&e.last_name), Some(&e.first_name), e.middle_name.as_ref(), Some(&e.personnel_number)]
                        .into_iter()
                        .flatten()
                        .any(|v| v.to_lowercase().contains(&keyword));
                keyword_hit
                    && search.brigada_id.map_or(true, |id| e.brigada_id == Some(id))
                    && search.service_type_id.map_or(true, |id| e.service_type_id == Some(id))
            });

            let total = matched.len() as u32;
            let employees = matched
                .into_iter()
                .skip(search.offset as usize)
                .take(search.page_size as usize)
                .collect();
            EmployeeSearchResult { employees, total }
        }))
    }

    async fn find_employees_by_brigada(&self, brigada_id: i32) -> DatabaseResult<Vec<EmployeeInfo>> {
        Ok(self.with(|t| t.employees_sorted(|e| e.brigada_id == Some(brigada_id))))
    }

    async fn get_employee_by_id(&self, id: i32) -> DatabaseResult<Option<EmployeeInfo>> {
        Ok(self.with(|t| t.employees.iter().find(|e| e.id == id).cloned().map(|e| t.employee(e))))
    }

    async fn find_employee_by_personnel_number(&self, personnel_number: &str) -> DatabaseResult<Option<EmployeeInfo>> {
        Ok(self.with(|t| {
            t.employees
                .iter()
                .find(|e| e.personnel_number == personnel_number)
                .cloned()
                .map(|e| t.employee(e))
        }))
    }

    async fn count_employees_by_brigada(&self, brigada_id: i32) -> DatabaseResult<i64> {
        Ok(self.with(|t| t.employees.iter().filter(|e| e.brigada_id == Some(brigada_id)).count() as i64))
    }

    async fn count_employees_by_locomotive(&self, locomotive_id: i32) -> DatabaseResult<i64> {
        Ok(self.with(|t| t.employees.iter().filter(|e| e.locomotive_id == Some(locomotive_id)).count() as i64))
    }

    async fn create_employee(&self, employee: EmployeeCreate) -> DatabaseResult<EmployeeInfo> {
        Ok(self.with(|t| {
            let info = EmployeeInfo {
                id: t.next_id(),
                personnel_number: employee.personnel_number,
                last_name: employee.last_name,
                first_name: employee.first_name,
                middle_name: employee.middle_name,
                position: employee.position,
                phone: employee.phone,
                birth_date: employee.birth_date,
                hire_date: employee.hire_date,
                photo: None,
                service_type_id: employee.service_type_id,
                service_type_name: None,
                work_type_id: employee.work_type_id,
                work_type_name: None,
                brigada_id: employee.brigada_id,
                brigada_name: None,
                locomotive_id: employee.locomotive_id,
                locomotive_number: None,
            };
            t.employees.push(info.clone());
            t.employee(info)
        }))
    }

    async fn update_employee(&self, id: i32, update: EmployeeUpdate) -> DatabaseResult<Option<EmployeeInfo>> {
        Ok(self.with(|t| {
            let row = t.employees.iter_mut().find(|e| e.id == id)?;
            if let Some(v) = update.personnel_number {
                row.personnel_number = v;
            }
            if let Some(v) = update.last_name {
                row.last_name = v;
            }
            if let Some(v) = update.first_name {
                row.first_name = v;
            }
            if update.middle_name.is_some() {
                row.middle_name = update.middle_name;
            }
            if let Some(v) = update.position {
                row.position = v;
            }
            if update.phone.is_some() {
                row.phone = update.phone;
            }
            if update.birth_date.is_some() {
                row.birth_date = update.birth_date;
            }
            if update.hire_date.is_some() {
                row.hire_date = update.hire_date;
            }
            if let Some(v) = update.service_type_id {
                row.service_type_id = v;
            }
            if let Some(v) = update.work_type_id {
                row.work_type_id = v;
            }
            if let Some(v) = update.brigada_id {
                row.brigada_id = v;
            }
            if let Some(v) = update.locomotive_id {
                row.locomotive_id = v;
            }
            let row = row.clone();
            Some(t.employee(row))
        }))
    }

    async fn update_employee_photo(&self, id: i32, photo: &str) -> DatabaseResult<Option<EmployeeInfo>> {
        Ok(self.with(|t| {
            let row = t.employees.iter_mut().find(|e| e.id == id)?;
            row.photo = Some(photo.to_string());
            let row = row.clone();
            Some(t.employee(row))
        }))
    }

    async fn delete_employee(&self, id: i32) -> DatabaseResult<Option<EmployeeInfo>> {
        Ok(self.with(|t| {
            let index = t.employees.iter().position(|e| e.id == id)?;
            let removed = t.employees.remove(index);
            // 假期随员工级联删除
            t.leaves.retain(|l| l.employee_id != id);
            Some(t.employee(removed))
        }))
    }
}

#[async_trait]
impl LeaveTypeRepositoryTrait for MemoryDb {
    async fn find_leave_types(&self) -> DatabaseResult<Vec<LeaveTypeInfo>> {
        Ok(self.with(|t| by_name(t.leave_types.clone(), |l| l.name.as_str())))
    }

    async fn get_leave_type_by_id(&self, id: i32) -> DatabaseResult<Option<LeaveTypeInfo>> {
        Ok(self.with(|t| t.leave_types.iter().find(|l| l.id == id).cloned()))
    }

    async fn find_leave_type_by_name(&self, name: &str) -> DatabaseResult<Option<LeaveTypeInfo>> {
        Ok(self.with(|t| t.leave_types.iter().find(|l| l.name == name).cloned()))
    }

    async fn create_leave_type(&self, leave_type: LeaveTypeCreate) -> DatabaseResult<LeaveTypeInfo> {
        Ok(self.with(|t| {
            let info = LeaveTypeInfo {
                id: t.next_id(),
                name: leave_type.name,
                description: leave_type.description,
            };
            t.leave_types.push(info.clone());
            info
        }))
    }

    async fn update_leave_type(&self, id: i32, update: LeaveTypeUpdate) -> DatabaseResult<Option<LeaveTypeInfo>> {
        Ok(self.with(|t| {
            let row = t.leave_types.iter_mut().find(|l| l.id == id)?;
            if let Some(name) = update.name {
                row.name = name;
            }
            if update.description.is_some() {
                row.description = update.description;
            }
            Some(row.clone())
        }))
    }

    async fn delete_leave_type(&self, id: i32) -> DatabaseResult<Option<LeaveTypeInfo>> {
        Ok(self.with(|t| {
            let index = t.leave_types.iter().position(|l| l.id == id)?;
            Some(t.leave_types.remove(index))
        }))
    }
}

#[async_trait]
impl LeaveRepositoryTrait for MemoryDb {
    async fn find_leaves(&self, filter: LeaveFilter) -> DatabaseResult<Vec<LeaveInfo>> {
        Ok(self.with(|t| {
            let mut leaves = t.leaves_where(|l| filter.matches(l));
            leaves.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(a.id.cmp(&b.id)));
            leaves
        }))
    }

    async fn get_leave_by_id(&self, id: i32) -> DatabaseResult<Option<LeaveInfo>> {
        Ok(self.with(|t| t.leaves.iter().find(|l| l.id == id).cloned().map(|l| t.leave(l))))
    }

    async fn find_overlapping_leaves(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> DatabaseResult<Vec<LeaveInfo>> {
        Ok(self.with(|t| {
            t.leaves_where(|l| {
                l.employee_id == employee_id && Some(l.id) != exclude_id && l.overlaps(start_date, end_date)
            })
        }))
    }

    async fn find_active_leaves(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>> {
        Ok(self.with(|t| {
            let mut leaves = t.leaves_where(|l| l.status(today) == LeaveStatus::Active);
            leaves.sort_by_key(|l| (l.end_date, l.id));
            leaves
        }))
    }

    async fn find_upcoming_leaves(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>> {
        Ok(self.with(|t| t.leaves_where(|l| l.status(today) == LeaveStatus::Upcoming)))
    }

    async fn find_leaves_for_day(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>> {
        Ok(self.with(|t| t.leaves_where(|l| touches_day(l.start_date, l.end_date, today))))
    }

    async fn leave_statistics(&self, today: NaiveDate) -> DatabaseResult<LeaveStatistics> {
        Ok(self.with(|t| {
            let mut statistics = LeaveStatistics::default();
            let mut on_leave = Vec::new();
            for leave in &t.leaves {
                statistics.total += 1;
                match leave.status(today) {
                    LeaveStatus::Active => {
                        statistics.active += 1;
                        if !on_leave.contains(&leave.employee_id) {
                            on_leave.push(leave.employee_id);
                        }
                    }
                    LeaveStatus::Upcoming => statistics.upcoming += 1,
                    LeaveStatus::Past => statistics.past += 1,
                }
            }
            statistics.employees_on_leave = on_leave.len() as i64;

            let types = by_name(t.leave_types.clone(), |l| l.name.as_str());
            statistics.by_type = types
                .into_iter()
                .map(|lt| LeaveTypeCount {
                    count: t.leaves.iter().filter(|l| l.leave_type_id == lt.id).count() as i64,
                    leave_type_id: lt.id,
                    leave_type_name: lt.name,
                })
                .collect();
            statistics
        }))
    }

    async fn count_leaves_by_type(&self, leave_type_id: i32) -> DatabaseResult<i64> {
        Ok(self.with(|t| t.leaves.iter().filter(|l| l.leave_type_id == leave_type_id).count() as i64))
    }

    async fn create_leave(&self, leave: LeaveCreate) -> DatabaseResult<LeaveInfo> {
        self.apply_concurrent_write();
        self.with(|t| {
            if t.violates_no_overlap(leave.employee_id, leave.start_date, leave.end_date, None) {
                return Err(exclusion_violation());
            }
            Ok(t.insert_leave(leave))
        })
    }

    async fn update_leave(&self, id: i32, update: LeaveUpdate) -> DatabaseResult<Option<LeaveInfo>> {
        self.apply_concurrent_write();
        self.with(|t| {
            let Some(current) = t.leaves.iter().find(|l| l.id == id).cloned() else {
                return Ok(None);
            };
            let employee_id = update.employee_id.unwrap_or(current.employee_id);
            let start = update.start_date.unwrap_or(current.start_date);
            let end = update.end_date.unwrap_or(current.end_date);
            if t.violates_no_overlap(employee_id, start, end, Some(id)) {
                return Err(exclusion_violation());
            }

            let Some(row) = t.leaves.iter_mut().find(|l| l.id == id) else {
                return Ok(None);
            };
            if let Some(v) = update.employee_id {
                row.employee_id = v;
            }
            if let Some(v) = update.leave_type_id {
                row.leave_type_id = v;
            }
            if let Some(v) = update.start_date {
                row.start_date = v;
            }
            if let Some(v) = update.end_date {
                row.end_date = v;
            }
            if update.comment.is_some() {
                row.comment = update.comment;
            }
            let row = row.clone();
            Ok(Some(t.leave(row)))
        })
    }

    async fn delete_leave(&self, id: i32) -> DatabaseResult<Option<LeaveInfo>> {
        Ok(self.with(|t| {
            let index = t.leaves.iter().position(|l| l.id == id)?;
            let removed = t.leaves.remove(index);
            Some(t.leave(removed))
        }))
    }
}

/// 测试用配置，照片目录为独立的临时目录
pub fn test_config() -> Arc<AppConfig> {
    let upload_dir = std::env::temp_dir().join(format!("depot-test-{}", uuid::Uuid::new_v4()));
    Arc::new(AppConfig {
        postgresql_conn_str: "postgres://unused".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        upload_dir: upload_dir.to_string_lossy().into_owned(),
        db_max_connections: 1,
        max_photo_bytes: 1024,
    })
}

/// 以固定的"今天"构造应用状态
pub fn test_state(today: NaiveDate) -> (AppState, Arc<MemoryDb>) {
    let db = MemoryDb::new();
    let state = AppState::with_clock(db.repositories(), test_config(), Arc::new(move || today));
    (state, db)
}

/// 创建一个没有任何关联的员工，返回员工 ID
pub async fn seed_employee(state: &AppState, personnel_number: &str, last_name: &str) -> i32 {
    state
        .employees
        .create_employee(EmployeeCreate {
            personnel_number: personnel_number.to_string(),
            last_name: last_name.to_string(),
            first_name: "Иван".to_string(),
            middle_name: None,
            position: "Машинист".to_string(),
            phone: None,
            birth_date: None,
            hire_date: None,
            service_type_id: None,
            work_type_id: None,
            brigada_id: None,
            locomotive_id: None,
        })
        .await
        .unwrap()
        .id
}

pub async fn seed_leave_type(state: &AppState, name: &str) -> i32 {
    state
        .leave_types
        .create_leave_type(LeaveTypeCreate {
            name: name.to_string(),
            description: None,
        })
        .await
        .unwrap()
        .id
}

pub async fn seed_leave(
    state: &AppState,
    employee_id: i32,
    leave_type_id: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> i32 {
    state
        .leaves
        .create_leave(LeaveCreate {
            employee_id,
            leave_type_id,
            start_date: start,
            end_date: end,
            comment: None,
        })
        .await
        .unwrap()
        .id
}
