// src/services/sale_service.rs

use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::{MedicineRepository, PartyRepository, SaleRepository},
    models::{
        inventory::Medicine,
        sales::{CartLine, PaymentMethod, Sale, SaleDetail, SaleTotals},
    },
};

const PERCENT_MAX: Decimal = Decimal::ONE_HUNDRED;

// O motor de vendas: valida o carrinho, calcula os valores, grava a venda
// com seus itens e dá baixa no estoque — tudo ou nada.
#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    medicine_repo: MedicineRepository,
    party_repo: PartyRepository,
}

impl SaleService {
    pub fn new(
        sale_repo: SaleRepository,
        medicine_repo: MedicineRepository,
        party_repo: PartyRepository,
    ) -> Self {
        Self {
            sale_repo,
            medicine_repo,
            party_repo,
        }
    }

    // --- CRIAR VENDA ---
    #[allow(clippy::too_many_arguments)]
    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        cashier_id: Uuid,
        items: &[CartLine],
        customer_id: Option<Uuid>,
        discount: Decimal,
        tax: Decimal,
        payment_method: PaymentMethod,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // 1. Validações puras, antes de tocar no banco
        validate_cart(items, discount, tax)?;

        let total_amount: Decimal = items.iter().map(|line| line.total).sum();
        let totals = compute_totals(total_amount, discount, tax);

        // 2. Uma única transação: venda + itens + baixas de estoque.
        // Qualquer erro daqui em diante desfaz tudo (rollback no drop).
        let mut tx = executor.begin().await?;

        if let Some(cid) = customer_id {
            self.party_repo
                .get_customer(&mut *tx, cid)
                .await?
                .ok_or(AppError::CustomerNotFound(cid))?;
        }

        // 3. Resolve cada medicamento travando a linha (FOR UPDATE). Vendas
        // concorrentes do mesmo item serializam aqui; a perdedora enxerga o
        // estoque já decrementado.
        let mut resolved = Vec::with_capacity(items.len());
        for line in items {
            let medicine = self
                .medicine_repo
                .get_for_update(&mut *tx, line.medicine_id)
                .await?
                .ok_or(AppError::MedicineNotFound(line.medicine_id))?;

            check_line_stock(&medicine, line.quantity)?;

            resolved.push(medicine);
        }

        // 4. Persiste o cabeçalho, depois os itens, depois as baixas
        let sale = self
            .sale_repo
            .create_sale(
                &mut *tx,
                customer_id,
                cashier_id,
                totals.total_amount,
                discount,
                tax,
                totals.final_amount,
                payment_method,
            )
            .await?;

        for (line, medicine) in items.iter().zip(&resolved) {
            self.sale_repo
                .add_sale_item(
                    &mut *tx,
                    sale.id,
                    line.medicine_id,
                    &medicine.name,
                    line.quantity,
                    line.price,
                    line.total,
                )
                .await?;
        }

        for (line, medicine) in items.iter().zip(&resolved) {
            let remaining = self
                .medicine_repo
                .decrement_stock(&mut *tx, line.medicine_id, line.quantity)
                .await?;

            // Segunda barreira sob o lock; com FOR UPDATE não deve falhar,
            // mas se falhar a venda inteira é desfeita.
            if remaining.is_none() {
                return Err(AppError::InsufficientStock {
                    medicine_id: line.medicine_id,
                    requested: line.quantity,
                    available: medicine.stock_quantity,
                });
            }
        }

        tx.commit().await?;
        Ok(sale)
    }

    // --- HISTÓRICO ---

    pub async fn list_recent<'e, E>(&self, executor: E, limit: i64) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.sale_repo.list_recent(executor, limit).await
    }

    pub async fn get_sale_detail<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<SaleDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let header = self
            .sale_repo
            .get_sale(&mut *tx, sale_id)
            .await?
            .ok_or(AppError::SaleNotFound(sale_id))?;

        let items = self.sale_repo.list_sale_items(&mut *tx, sale_id).await?;

        let (customer_name, cashier_email) = self
            .sale_repo
            .sale_names(&mut *tx, sale_id)
            .await?
            .ok_or(AppError::SaleNotFound(sale_id))?;

        tx.commit().await?;

        Ok(SaleDetail {
            header,
            customer_name,
            cashier_email,
            items,
        })
    }
}

// ---
// Lógica pura (sem banco): validação do carrinho e cálculo dos valores
// ---

pub(crate) fn validate_cart(
    items: &[CartLine],
    discount: Decimal,
    tax: Decimal,
) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::EmptyCart);
    }

    if discount < Decimal::ZERO || discount > PERCENT_MAX {
        return Err(percentage_error("discount"));
    }
    if tax < Decimal::ZERO || tax > PERCENT_MAX {
        return Err(percentage_error("tax"));
    }

    for line in items {
        if line.quantity <= 0 {
            return Err(quantity_error());
        }
        if line.price < Decimal::ZERO {
            return Err(price_error());
        }

        // O total vem do caixa (preço do momento da venda), mas precisa
        // bater exatamente com quantidade x preço unitário.
        let expected = Decimal::from(line.quantity) * line.price;
        if line.total != expected {
            return Err(AppError::LineTotalMismatch {
                medicine_id: line.medicine_id,
                expected,
                received: line.total,
            });
        }
    }

    Ok(())
}

/// Disponibilidade de uma linha resolvida: medicamento ativo e com saldo
/// para a quantidade pedida. Chamada pelo motor sob o lock de linha.
pub(crate) fn check_line_stock(medicine: &Medicine, requested: i32) -> Result<(), AppError> {
    if !medicine.is_active {
        return Err(AppError::MedicineInactive(medicine.id));
    }

    if medicine.stock_quantity < requested {
        return Err(AppError::InsufficientStock {
            medicine_id: medicine.id,
            requested,
            available: medicine.stock_quantity,
        });
    }

    Ok(())
}

/// Calcula desconto, imposto e total final com aritmética decimal exata.
/// Arredondamento "half-up" para 2 casas na hora de guardar cada valor;
/// o total final é a soma dos valores já arredondados, para que
/// final == total - desconto + imposto feche no centavo.
pub(crate) fn compute_totals(total_amount: Decimal, discount: Decimal, tax: Decimal) -> SaleTotals {
    let discount_amount = round_money(total_amount * discount / PERCENT_MAX);
    let tax_amount = round_money((total_amount - discount_amount) * tax / PERCENT_MAX);
    let final_amount = total_amount - discount_amount + tax_amount;

    SaleTotals {
        total_amount: round_money(total_amount),
        discount_amount,
        tax_amount,
        final_amount,
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn percentage_error(field: &'static str) -> AppError {
    let mut err = ValidationError::new("range");
    err.message = Some("O percentual deve estar entre 0 e 100.".into());
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    AppError::ValidationError(errors)
}

fn quantity_error() -> AppError {
    let mut err = ValidationError::new("range");
    err.message = Some("A quantidade deve ser maior que zero.".into());
    let mut errors = ValidationErrors::new();
    errors.add("items", err);
    AppError::ValidationError(errors)
}

fn price_error() -> AppError {
    let mut err = ValidationError::new("range");
    err.message = Some("O preço não pode ser negativo.".into());
    let mut errors = ValidationErrors::new();
    errors.add("items", err);
    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::MedicineCategory;
    use chrono::{NaiveDate, Utc};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn medicine_with_stock(stock_quantity: i32) -> Medicine {
        Medicine {
            id: Uuid::new_v4(),
            name: "Amoxicilina 500mg".to_string(),
            generic_name: Some("Amoxicilina".to_string()),
            category: MedicineCategory::Capsule,
            manufacturer: "Medley".to_string(),
            supplier_id: Uuid::new_v4(),
            batch_number: "L02".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            purchase_price: dec("4.10"),
            selling_price: dec("7.90"),
            stock_quantity,
            minimum_stock: 10,
            description: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(quantity: i32, price: &str, total: &str) -> CartLine {
        CartLine {
            medicine_id: Uuid::new_v4(),
            quantity,
            price: dec(price),
            total: dec(total),
        }
    }

    #[test]
    fn empty_cart_is_rejected() {
        let err = validate_cart(&[], Decimal::ZERO, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AppError::EmptyCart));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let items = [line(-1, "8.50", "-8.50")];
        let err = validate_cart(&items, Decimal::ZERO, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn discount_above_100_is_rejected() {
        let items = [line(1, "8.50", "8.50")];
        let err = validate_cart(&items, dec("101"), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn negative_tax_is_rejected() {
        let items = [line(1, "8.50", "8.50")];
        let err = validate_cart(&items, Decimal::ZERO, dec("-1")).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn line_total_must_equal_quantity_times_price() {
        let items = [line(2, "8.50", "17.01")];
        let err = validate_cart(&items, Decimal::ZERO, Decimal::ZERO).unwrap_err();
        match err {
            AppError::LineTotalMismatch {
                expected, received, ..
            } => {
                assert_eq!(expected, dec("17.00"));
                assert_eq!(received, dec("17.01"));
            }
            other => panic!("esperado LineTotalMismatch, veio {:?}", other),
        }
    }

    // Pedir mais do que há em estoque falha com os dois números no erro
    #[test]
    fn requesting_more_than_stock_is_insufficient() {
        let medicine = medicine_with_stock(5);
        let err = check_line_stock(&medicine, 1000).unwrap_err();
        match err {
            AppError::InsufficientStock {
                medicine_id,
                requested,
                available,
            } => {
                assert_eq!(medicine_id, medicine.id);
                assert_eq!(requested, 1000);
                assert_eq!(available, 5);
            }
            other => panic!("esperado InsufficientStock, veio {:?}", other),
        }
    }

    #[test]
    fn requesting_exactly_the_stock_is_allowed() {
        let medicine = medicine_with_stock(5);
        assert!(check_line_stock(&medicine, 5).is_ok());
    }

    #[test]
    fn inactive_medicine_cannot_be_sold() {
        let mut medicine = medicine_with_stock(5);
        medicine.is_active = false;
        let err = check_line_stock(&medicine, 1).unwrap_err();
        assert!(matches!(err, AppError::MedicineInactive(id) if id == medicine.id));
    }

    #[test]
    fn valid_cart_passes() {
        let items = [line(2, "8.50", "17.00"), line(3, "5.00", "15.00")];
        assert!(validate_cart(&items, dec("10"), dec("5")).is_ok());
    }

    // Cenário de referência do caixa: 2 x 8.50, desconto 10%, imposto 5%
    #[test]
    fn totals_reference_scenario() {
        let totals = compute_totals(dec("17.00"), dec("10"), dec("5"));
        assert_eq!(totals.total_amount, dec("17.00"));
        assert_eq!(totals.discount_amount, dec("1.70"));
        // 15.30 * 5% = 0.765 -> 0.77 (half-up)
        assert_eq!(totals.tax_amount, dec("0.77"));
        assert_eq!(totals.final_amount, dec("16.07"));
    }

    #[test]
    fn totals_without_discount_or_tax() {
        let totals = compute_totals(dec("23.40"), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.discount_amount, Decimal::ZERO.round_dp(2));
        assert_eq!(totals.tax_amount, Decimal::ZERO.round_dp(2));
        assert_eq!(totals.final_amount, dec("23.40"));
    }

    #[test]
    fn full_discount_zeroes_the_sale() {
        let totals = compute_totals(dec("50.00"), dec("100"), dec("18"));
        assert_eq!(totals.discount_amount, dec("50.00"));
        assert_eq!(totals.tax_amount, dec("0.00"));
        assert_eq!(totals.final_amount, dec("0.00"));
    }

    // final == total - desconto + imposto, exato no centavo
    #[test]
    fn final_amount_identity_holds() {
        let cases = [
            ("17.00", "10", "5"),
            ("99.99", "7.5", "12.25"),
            ("0.01", "50", "50"),
            ("1234.56", "0", "18"),
            ("10.00", "33.33", "6.66"),
        ];

        for (total, discount, tax) in cases {
            let t = compute_totals(dec(total), dec(discount), dec(tax));
            assert_eq!(
                t.final_amount,
                t.total_amount - t.discount_amount + t.tax_amount,
                "identidade falhou para total={} desconto={} imposto={}",
                total,
                discount,
                tax
            );
            assert_eq!(t.discount_amount, t.discount_amount.round_dp(2));
            assert_eq!(t.tax_amount, t.tax_amount.round_dp(2));
        }
    }

    // A soma dos totais das linhas é o total_amount da venda
    #[test]
    fn cart_total_is_sum_of_line_totals() {
        let items = [line(2, "8.50", "17.00"), line(1, "12.30", "12.30")];
        let total: Decimal = items.iter().map(|l| l.total).sum();
        let totals = compute_totals(total, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.total_amount, dec("29.30"));
    }
}
